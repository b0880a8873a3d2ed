//! Common test utilities shared across integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path of the kmap binary built by cargo for this test run
pub fn kmap_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kmap"))
}

/// Run the kmap binary directly in the specified directory
pub fn run_kmap_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(kmap_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute kmap binary")
}

/// Write a JSONL knowledge map into `dir`
pub fn write_map(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("Failed to write map");
}

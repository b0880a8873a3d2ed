//! Application context for CLI command execution.
//!
//! This module provides the `App` struct that resolves configuration, loads
//! the knowledge map, and hands commands a read-only store.

use crate::config::KmapConfig;
use crate::error::Result;
use crate::store::{InMemoryStore, LoadWarning, load_from_jsonl};
use std::path::{Path, PathBuf};

/// Application context for CLI operations.
#[derive(Debug)]
pub struct App {
    /// The loaded knowledge map
    store: InMemoryStore,

    /// Effective configuration
    config: KmapConfig,

    /// Resolved path of the data file
    data_file: PathBuf,

    /// Non-fatal problems found while loading
    warnings: Vec<LoadWarning>,
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// `config_path` and `data_path` override the discovered config file and
    /// the configured data file. Relative paths resolve against `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicitly named configuration file is missing or invalid
    /// - The data file cannot be read
    pub fn from_directory(
        working_dir: &Path,
        config_path: Option<&Path>,
        data_path: Option<&Path>,
    ) -> Result<Self> {
        let config_path = config_path.map(|p| working_dir.join(p));
        let config = KmapConfig::discover(config_path.as_deref(), working_dir)?;

        let data_file = working_dir.join(data_path.unwrap_or(config.data_file.as_path()));
        let (store, warnings) = load_from_jsonl(&data_file)?;

        Ok(Self {
            store,
            config,
            data_file,
            warnings,
        })
    }

    /// Get the loaded store.
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &KmapConfig {
        &self.config
    }

    /// Get the resolved data file path.
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Warnings collected while loading the data file.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }
}

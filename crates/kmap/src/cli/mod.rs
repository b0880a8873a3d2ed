//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `dot`: Render the knowledge map (or a key node's neighborhood) as DOT
//! - `nodes`: List nodes with their prerequisite counts
//! - `cycles`: Report dependency cycles
//!
//! # Global Flags
//!
//! - `--data`: JSONL knowledge map (default from kmap.yaml, else `kmap.jsonl`)
//! - `--config`: Configuration file (default `kmap.yaml` if present)
//! - `--json`: Output in JSON format
//!
//! # Example
//!
//! ```bash
//! kmap dot --key bayes --depth 2 | dot -Tsvg > bayes.svg
//! kmap --data maps/ml.jsonl nodes
//! kmap cycles --json
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{CyclesArgs, DotArgs, NodesArgs};
pub use execute::render_dot_command;
pub use validators::validate_node_id;

/// Kmap - knowledge-map graph extraction
///
/// Loads a JSONL knowledge map and renders it, or the prerequisite
/// neighborhood of a single concept, as a Graphviz DOT graph.
#[derive(Parser, Debug)]
#[command(name = "kmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// JSONL file holding the knowledge map
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Configuration file (defaults to ./kmap.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render the knowledge map as a Graphviz digraph
    ///
    /// With `--key`, renders only the key node and its prerequisites up to
    /// `--depth` levels away. Without it, renders every node.
    Dot(DotArgs),

    /// List all nodes
    ///
    /// Shows each node's ID, title, and number of distinct prerequisites.
    Nodes(NodesArgs),

    /// Report dependency cycles
    ///
    /// Cycles are allowed but usually indicate a data-entry mistake.
    Cycles(CyclesArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;
        use crate::store::ModelStore;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        let Some(command) = &self.command else {
            println!("Kmap knowledge-map tool");
            println!("Use --help for more information");
            return Ok(());
        };

        let app = App::from_directory(
            &std::env::current_dir()?,
            self.config.as_deref(),
            self.data.as_deref(),
        )?;
        tracing::debug!(
            data_file = %app.data_file().display(),
            nodes = app.store().len(),
            "Knowledge map ready"
        );
        execute::report_warnings(&app)?;

        match command {
            Commands::Dot(args) => execute::execute_dot(&app, args, output_mode),
            Commands::Nodes(args) => execute::execute_nodes(&app, args, output_mode),
            Commands::Cycles(args) => execute::execute_cycles(&app, args, output_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== CLI Parsing Tests ==========

    #[test]
    fn test_parse_no_command() {
        let cli = Cli::try_parse_from(["kmap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_dot_full() {
        let cli = Cli::try_parse_from(["kmap", "dot"]).unwrap();
        match cli.command {
            Some(Commands::Dot(args)) => {
                assert!(args.key.is_none());
                assert!(args.depth.is_none());
                assert!(!args.bottom_up);
            }
            _ => panic!("Expected Dot command"),
        }
    }

    #[test]
    fn test_parse_dot_bounded() {
        let cli =
            Cli::try_parse_from(["kmap", "dot", "--key", " bayes ", "--depth", "3", "-b"]).unwrap();
        match cli.command {
            Some(Commands::Dot(args)) => {
                assert_eq!(args.key.as_deref(), Some("bayes"));
                assert_eq!(args.depth, Some(3));
                assert!(args.bottom_up);
            }
            _ => panic!("Expected Dot command"),
        }
    }

    #[test]
    fn test_parse_negative_depth_reaches_validation() {
        let cli = Cli::try_parse_from(["kmap", "dot", "--key", "a", "--depth", "-2"]).unwrap();
        match cli.command {
            Some(Commands::Dot(args)) => assert_eq!(args.depth, Some(-2)),
            _ => panic!("Expected Dot command"),
        }
    }

    #[test]
    fn test_parse_empty_key_rejected() {
        assert!(Cli::try_parse_from(["kmap", "dot", "--key", "  "]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["kmap", "nodes", "--json", "--data", "maps/ml.jsonl"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data, Some(PathBuf::from("maps/ml.jsonl")));
        assert!(matches!(cli.command, Some(Commands::Nodes(_))));
    }

    #[test]
    fn test_parse_cycles() {
        let cli = Cli::try_parse_from(["kmap", "--config", "alt.yaml", "cycles"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(matches!(cli.command, Some(Commands::Cycles(_))));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(Cli::try_parse_from(["kmap", "render"]).is_err());
    }
}

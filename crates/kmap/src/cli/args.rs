//! CLI argument structs for all commands.

use clap::Parser;

use super::validators::validate_node_id;

/// Arguments for the `dot` command
#[derive(Parser, Debug, Clone, Default)]
pub struct DotArgs {
    /// Key node to center the view on
    ///
    /// When omitted, the whole knowledge map is rendered.
    #[arg(short, long, value_parser = validate_node_id)]
    pub key: Option<String>,

    /// Number of prerequisite levels to include around the key node
    ///
    /// Defaults to `default-depth` from kmap.yaml, or 2.
    #[arg(short, long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Draw prerequisites below the nodes that depend on them
    #[arg(short, long)]
    pub bottom_up: bool,
}

/// Arguments for the `nodes` command
#[derive(Parser, Debug, Clone, Default)]
pub struct NodesArgs {}

/// Arguments for the `cycles` command
#[derive(Parser, Debug, Clone, Default)]
pub struct CyclesArgs {}

//! Error types for kmap operations.

use crate::domain::NodeId;
use std::io;
use thiserror::Error;

/// The error type for kmap operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Node not found in the store.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A node already exists with this identifier.
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// A dependency edge the store advertised could not be fetched.
    ///
    /// This means the store broke its own contract: the source id came from
    /// the node's unique dependency sources but no edge carries that key.
    #[error("Dependency edge not found: {source_id} -> {target}")]
    DependencyNotFound {
        /// The node owning the edge collection
        target: NodeId,
        /// The prerequisite that was looked up
        source_id: NodeId,
    },

    /// Caller supplied an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A specialized Result type for kmap operations.
pub type Result<T> = std::result::Result<T, Error>;

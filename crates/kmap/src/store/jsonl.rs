//! JSONL loading for the in-memory store.
//!
//! Each line of the data file is a serialized [`NodeRecord`]. Loading is
//! resilient: bad lines are skipped and reported as [`LoadWarning`]s rather
//! than aborting the whole load.

use super::InMemoryStore;
use crate::domain::{NodeId, NodeRecord};
use crate::error::Result;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Warnings that can occur during JSONL file loading.
///
/// These are non-fatal issues that don't prevent loading but indicate
/// data quality problems in the JSONL file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Malformed JSON line that couldn't be parsed
    ///
    /// **Effect**: Line is skipped entirely.
    MalformedJson {
        /// The 1-based line number
        line_number: usize,
        /// Parser error message
        error: String,
    },

    /// A node ID appeared on more than one line
    ///
    /// **Effect**: The later line is skipped; the first definition wins.
    DuplicateNode {
        /// The repeated ID
        id: NodeId,
        /// The 1-based line number of the skipped record
        line_number: usize,
    },

    /// A node listed the same prerequisite twice
    ///
    /// **Effect**: The later entry is dropped; the first edge wins.
    DuplicateDependency {
        /// The node owning the edges
        target: NodeId,
        /// The repeated prerequisite
        source: NodeId,
    },

    /// Dependency references a node that doesn't exist in the file
    ///
    /// **Effect**: The edge is kept. Full extraction still draws it; bounded
    /// extraction fails if it reaches the missing node.
    OrphanedDependency {
        /// The missing prerequisite
        from: NodeId,
        /// The node that depends on it
        to: NodeId,
    },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson { line_number, error } => {
                write!(f, "Skipped malformed JSON at line {line_number}: {error}")
            }
            Self::DuplicateNode { id, line_number } => {
                write!(f, "Skipped duplicate node '{id}' at line {line_number}")
            }
            Self::DuplicateDependency { target, source } => {
                write!(f, "Dropped duplicate dependency {source} -> {target}")
            }
            Self::OrphanedDependency { from, to } => {
                write!(f, "Dependency {from} -> {to} references an unknown node")
            }
        }
    }
}

/// Load a store from a JSONL file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read. Data problems
/// are reported as warnings instead.
pub fn load_from_jsonl(path: &Path) -> Result<(InMemoryStore, Vec<LoadWarning>)> {
    tracing::debug!(path = %path.display(), "Loading knowledge map");
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file))
}

/// Load a store from any buffered reader of JSONL data.
///
/// # Errors
///
/// Returns `Error::Io` if reading fails. Lines that are not valid UTF-8
/// are reported as [`LoadWarning::MalformedJson`].
pub fn load_from_reader<R: BufRead>(reader: R) -> Result<(InMemoryStore, Vec<LoadWarning>)> {
    let mut store = InMemoryStore::new();
    let mut warnings = Vec::new();

    // First pass: parse records and insert nodes
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let line_number = index + 1;
        let bytes = bytes?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(line) => line,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut record: NodeRecord = match serde_json::from_str(trimmed) {
            Ok(record) => record,
            Err(e) => {
                warnings.push(LoadWarning::MalformedJson {
                    line_number,
                    error: e.to_string(),
                });
                continue;
            }
        };

        if record.id.as_str().trim().is_empty() {
            warnings.push(LoadWarning::MalformedJson {
                line_number,
                error: "node ID cannot be empty".to_string(),
            });
            continue;
        }

        if store.contains(&record.id) {
            warnings.push(LoadWarning::DuplicateNode {
                id: record.id,
                line_number,
            });
            continue;
        }

        let mut seen = HashSet::new();
        let target = record.id.clone();
        record.dependencies.retain(|dep| {
            if seen.insert(dep.source.clone()) {
                true
            } else {
                warnings.push(LoadWarning::DuplicateDependency {
                    target: target.clone(),
                    source: dep.source.clone(),
                });
                false
            }
        });

        store.insert_node(record.into_node())?;
    }

    // Second pass: every source must name a loaded node
    for node in &store.nodes {
        for edge in node.dependencies() {
            if !store.contains(edge.source()) {
                warnings.push(LoadWarning::OrphanedDependency {
                    from: edge.source().clone(),
                    to: edge.target().clone(),
                });
            }
        }
    }

    for warning in &warnings {
        tracing::debug!("{}", warning);
    }
    tracing::debug!(
        nodes = store.nodes.len(),
        warnings = warnings.len(),
        "Knowledge map loaded"
    );

    Ok((store, warnings))
}

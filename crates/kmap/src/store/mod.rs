//! Storage abstraction layer for kmap.
//!
//! This module provides the [`ModelStore`] trait consumed by the graph
//! extractor, and the in-memory implementation populated from JSONL.
//!
//! # Architecture
//!
//! The store is read-only from the extractor's point of view. It is filled
//! once at load time and then queried repeatedly while the extractor walks
//! the dependency relation. All lookups are synchronous.
//!
//! # Example
//!
//! ```
//! use kmap::domain::{Node, NodeId};
//! use kmap::store::{InMemoryStore, ModelStore};
//!
//! let mut store = InMemoryStore::new();
//! store.insert_node(Node::new("a", "Probability")).unwrap();
//! store.insert_node(Node::new("b", "Bayes rule").with_dependency("a")).unwrap();
//!
//! let b = store.get_node(&NodeId::new("b")).unwrap();
//! assert_eq!(store.unique_dependency_source_ids(b), vec![NodeId::new("a")]);
//! ```

use crate::domain::{DependencyEdge, Node, NodeId};
use crate::dot::node_statement;
use crate::error::{Error, Result};
use std::collections::HashMap;

pub mod graph;
pub mod jsonl;

pub use graph::find_cycles;
pub use jsonl::{LoadWarning, load_from_jsonl, load_from_reader};

/// Read-only view of nodes and their dependency edges.
///
/// # Error Handling
///
/// - `NodeNotFound`: Requested node doesn't exist
/// - `DependencyNotFound`: Edge lookup missed for an advertised source
pub trait ModelStore {
    /// Get a node by ID.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if no node carries this ID.
    fn get_node(&self, id: &NodeId) -> Result<&Node>;

    /// All nodes in the store's native order.
    fn nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_>;

    /// Number of nodes in the store.
    fn len(&self) -> usize;

    /// Whether the store holds no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct prerequisite IDs of `node`, in order of first occurrence.
    fn unique_dependency_source_ids(&self, node: &Node) -> Vec<NodeId> {
        node.unique_dependency_source_ids()
    }

    /// Fetch the edge `source_id -> node`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DependencyNotFound` if the node has no such edge. For
    /// IDs obtained from [`ModelStore::unique_dependency_source_ids`] this
    /// indicates a broken store.
    fn dependency_edge<'a>(&self, node: &'a Node, source_id: &NodeId) -> Result<&'a DependencyEdge> {
        node.dependency(source_id)
            .ok_or_else(|| Error::DependencyNotFound {
                target: node.id().clone(),
                source_id: source_id.clone(),
            })
    }

    /// Renderable node statement.
    fn describe_node(&self, node: &Node) -> String {
        node_statement(node)
    }
}

/// In-memory store keeping nodes in insertion order.
///
/// Lookups by ID go through an index map, so `get_node` is O(1).
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    /// Nodes in insertion order
    nodes: Vec<Node>,

    /// Mapping from NodeId to position in `nodes`.
    ///
    /// Every node in `nodes` has exactly one entry here.
    index: HashMap<NodeId, usize>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node at the end of the store order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateNode` if the ID is taken, and
    /// `Error::InvalidArgument` if the node's edges are malformed.
    pub fn insert_node(&mut self, node: Node) -> Result<()> {
        node.validate().map_err(Error::InvalidArgument)?;

        if self.index.contains_key(node.id()) {
            return Err(Error::DuplicateNode(node.id().clone()));
        }

        self.index.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Whether a node with this ID exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }
}

impl ModelStore for InMemoryStore {
    fn get_node(&self, id: &NodeId) -> Result<&Node> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| Error::NodeNotFound(id.clone()))
    }

    fn nodes(&self) -> Box<dyn Iterator<Item = &Node> + '_> {
        Box::new(self.nodes.iter())
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

impl FromIterator<Node> for InMemoryStore {
    /// Collect nodes, silently keeping the first of any duplicate IDs.
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        let mut store = Self::new();
        for node in iter {
            if let Err(e) = store.insert_node(node) {
                tracing::debug!("Skipping node while collecting store: {}", e);
            }
        }
        store
    }
}

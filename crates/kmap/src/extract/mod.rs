//! Graph extraction.
//!
//! The extractor walks a [`ModelStore`] and produces a [`GraphDescription`]:
//! an ordered list of node and edge [`Fragment`]s, one statement each.
//!
//! # Fragment Ordering
//!
//! Node fragments are **prepended** and edge fragments **appended** as the
//! walk proceeds. Nodes processed later therefore appear earlier in the
//! output, while edges keep processing order. The ordering has no effect on
//! the rendered graph but is reproducible, so identical inputs always yield
//! identical text.
//!
//! # Bounded Extraction
//!
//! [`GraphExtractor::extract_bounded`] expands breadth-first from a key node
//! along the dependency relation (from a node to its prerequisites), one
//! full level per step. The key node is marked visited before the walk
//! starts, so cycles leading back to it never re-emit it. A prerequisite
//! shared by two nodes of the same level is connected only to whichever
//! node reaches it first.

use crate::domain::{DependencyEdge, NodeId};
use crate::dot::{DotOptions, edge_statement, render_dot};
use crate::error::{Error, Result};
use crate::store::ModelStore;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};

/// Default traversal depth when neither config nor caller supplies one.
pub const DEFAULT_DEPTH: usize = 2;

/// One statement of the output graph description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// A node statement
    Node {
        /// The emitted node
        id: NodeId,
        /// Renderable statement
        statement: String,
    },
    /// An edge statement, prerequisite first
    Edge {
        /// The prerequisite node
        source: NodeId,
        /// The dependent node
        target: NodeId,
        /// Renderable statement
        statement: String,
    },
}

impl Fragment {
    /// Node fragment using the default DOT description.
    pub fn node(node: &crate::domain::Node) -> Self {
        Self::Node {
            id: node.id().clone(),
            statement: crate::dot::node_statement(node),
        }
    }

    /// Edge fragment using the default DOT description.
    pub fn edge(edge: &DependencyEdge) -> Self {
        Self::Edge {
            source: edge.source().clone(),
            target: edge.target().clone(),
            statement: edge_statement(edge),
        }
    }

    /// The textual statement
    pub fn statement(&self) -> &str {
        match self {
            Self::Node { statement, .. } | Self::Edge { statement, .. } => statement,
        }
    }

    /// Whether this is a node statement
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node { .. })
    }
}

/// Ordered fragments produced by one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GraphDescription {
    fragments: Vec<Fragment>,
}

impl GraphDescription {
    /// Fragments in output order
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// IDs of emitted nodes in output order
    pub fn node_ids(&self) -> Vec<&NodeId> {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Node { id, .. } => Some(id),
                Fragment::Edge { .. } => None,
            })
            .collect()
    }

    /// Emitted edges as `(source, target)` pairs in output order
    pub fn edges(&self) -> Vec<(&NodeId, &NodeId)> {
        self.fragments
            .iter()
            .filter_map(|f| match f {
                Fragment::Edge { source, target, .. } => Some((source, target)),
                Fragment::Node { .. } => None,
            })
            .collect()
    }

    /// Render as a Graphviz `digraph`.
    pub fn to_dot(&self, options: DotOptions) -> String {
        render_dot(&self.fragments, options)
    }
}

/// Accumulates fragments with the prepend-nodes/append-edges ordering.
#[derive(Default)]
struct FragmentBuffer {
    items: VecDeque<Fragment>,
}

impl FragmentBuffer {
    fn push_node(&mut self, fragment: Fragment) {
        self.items.push_front(fragment);
    }

    fn push_edge(&mut self, fragment: Fragment) {
        self.items.push_back(fragment);
    }

    fn finish(self) -> GraphDescription {
        GraphDescription {
            fragments: self.items.into(),
        }
    }
}

/// Convert a signed depth into a traversal bound.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for negative values.
pub fn validate_depth(depth: i64) -> Result<usize> {
    usize::try_from(depth)
        .map_err(|_| Error::InvalidArgument(format!("depth must be non-negative, got {depth}")))
}

/// Extracts graph descriptions from a [`ModelStore`].
pub struct GraphExtractor<'a> {
    store: &'a dyn ModelStore,
}

impl<'a> GraphExtractor<'a> {
    /// Create an extractor over `store`
    pub fn new(store: &'a dyn ModelStore) -> Self {
        Self { store }
    }

    /// Extract the bounded neighborhood of `key` if given, else the whole map.
    ///
    /// # Errors
    ///
    /// See [`GraphExtractor::extract_full`] and
    /// [`GraphExtractor::extract_bounded`].
    pub fn extract(&self, key: Option<&NodeId>, depth: usize) -> Result<GraphDescription> {
        match key {
            Some(key) => self.extract_bounded(key, depth),
            None => self.extract_full(),
        }
    }

    /// Extract every node and every unique dependency edge.
    ///
    /// Edges whose source is missing from the store are still emitted.
    ///
    /// # Errors
    ///
    /// Returns `Error::DependencyNotFound` if the store breaks its edge
    /// lookup contract.
    pub fn extract_full(&self) -> Result<GraphDescription> {
        let mut buffer = FragmentBuffer::default();

        for node in self.store.nodes() {
            buffer.push_node(Fragment::Node {
                id: node.id().clone(),
                statement: self.store.describe_node(node),
            });

            for source_id in self.store.unique_dependency_source_ids(node) {
                let edge = self.store.dependency_edge(node, &source_id)?;
                buffer.push_edge(Fragment::edge(edge));
            }
        }

        let description = buffer.finish();
        tracing::debug!(
            fragments = description.fragments.len(),
            "Extracted full knowledge map"
        );
        Ok(description)
    }

    /// Extract nodes within `depth` prerequisite hops of `key_id`.
    ///
    /// A depth of 0 yields only the key node.
    ///
    /// # Errors
    ///
    /// Returns `Error::NodeNotFound` if `key_id`, or a prerequisite reached
    /// within the bound, is not in the store.
    pub fn extract_bounded(&self, key_id: &NodeId, depth: usize) -> Result<GraphDescription> {
        let key = self.store.get_node(key_id)?;

        let mut buffer = FragmentBuffer::default();
        buffer.push_node(Fragment::Node {
            id: key.id().clone(),
            statement: self.store.describe_node(key),
        });

        let mut visited: HashSet<NodeId> = HashSet::from([key.id().clone()]);
        let mut frontier = VecDeque::from([key]);
        let mut levels = 0;

        while levels < depth && !frontier.is_empty() {
            let mut next = VecDeque::new();

            while let Some(node) = frontier.pop_front() {
                for source_id in self.store.unique_dependency_source_ids(node) {
                    if visited.contains(&source_id) {
                        continue;
                    }

                    let source = self.store.get_node(&source_id)?;
                    let edge = self.store.dependency_edge(node, &source_id)?;

                    buffer.push_node(Fragment::Node {
                        id: source_id.clone(),
                        statement: self.store.describe_node(source),
                    });
                    buffer.push_edge(Fragment::edge(edge));

                    visited.insert(source_id);
                    next.push_back(source);
                }
            }

            frontier = next;
            levels += 1;
        }

        let description = buffer.finish();
        tracing::debug!(
            key = %key_id,
            depth,
            levels,
            nodes = visited.len(),
            "Extracted bounded knowledge map"
        );
        Ok(description)
    }
}

//! Domain types for knowledge maps.
//!
//! A knowledge map is a set of concept [`Node`]s. Each node owns the
//! [`DependencyEdge`]s pointing *to* it, one per prerequisite concept.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string representation of this ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Composite key of a dependency edge: `source` followed by `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    /// The prerequisite node
    pub source: NodeId,
    /// The node that depends on `source`
    pub target: NodeId,
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)
    }
}

/// A concept in the knowledge map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    title: String,
    dependencies: Vec<DependencyEdge>,
}

impl Node {
    /// Create a node with no dependencies
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            dependencies: Vec::new(),
        }
    }

    /// Add a prerequisite edge `source -> self` and return the node.
    #[must_use]
    pub fn with_dependency(mut self, source: impl Into<NodeId>) -> Self {
        let edge = DependencyEdge::new(source, self.id.clone());
        self.dependencies.push(edge);
        self
    }

    /// Add a fully specified edge and return the node.
    ///
    /// The edge is kept as given; stores reject edges that do not target
    /// this node.
    #[must_use]
    pub fn with_edge(mut self, edge: DependencyEdge) -> Self {
        self.dependencies.push(edge);
        self
    }

    /// The node identifier
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The raw title, possibly empty
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title shown in rendered graphs, falling back to the identifier.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            self.id.as_str()
        } else {
            &self.title
        }
    }

    /// Dependency edges in insertion order
    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    /// Distinct prerequisite ids in order of first occurrence.
    pub fn unique_dependency_source_ids(&self) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.dependencies
            .iter()
            .filter(|edge| seen.insert(edge.source()))
            .map(|edge| edge.source().clone())
            .collect()
    }

    /// The first edge from `source` into this node.
    pub fn dependency(&self, source: &NodeId) -> Option<&DependencyEdge> {
        self.dependencies.iter().find(|edge| edge.source() == source)
    }

    /// Check that the edge collection is well formed.
    ///
    /// Every edge must target this node and no composite key may repeat.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("Node ID cannot be empty".to_string());
        }

        let mut keys = HashSet::new();
        for edge in &self.dependencies {
            if edge.target() != &self.id {
                return Err(format!(
                    "Dependency {} targets '{}' instead of '{}'",
                    edge.key(),
                    edge.target(),
                    self.id
                ));
            }
            if !keys.insert(edge.key()) {
                return Err(format!(
                    "Duplicate dependency '{}' on node '{}'",
                    edge.source(),
                    self.id
                ));
            }
        }

        Ok(())
    }
}

/// Prerequisite relation: `source` must be understood before `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    source: NodeId,
    target: NodeId,
    reason: Option<String>,
    style: Option<String>,
}

impl DependencyEdge {
    /// Create a plain edge
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            reason: None,
            style: None,
        }
    }

    /// Attach a human readable reason, rendered as the edge label.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach raw Graphviz attributes, e.g. `color=gray`.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// The prerequisite node
    pub fn source(&self) -> &NodeId {
        &self.source
    }

    /// The dependent node
    pub fn target(&self) -> &NodeId {
        &self.target
    }

    /// Why the dependency exists, if recorded
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Raw Graphviz attributes, if any
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Composite key of this edge
    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

/// One line of the JSONL data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node identifier
    pub id: NodeId,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Prerequisites of this node
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRecord>,
}

/// A prerequisite entry inside a [`NodeRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// The prerequisite node
    pub source: NodeId,

    /// Edge label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Raw Graphviz edge attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl NodeRecord {
    /// Convert to a [`Node`], targeting every dependency at this record.
    pub fn into_node(self) -> Node {
        let mut node = Node::new(self.id, self.title);
        for dep in self.dependencies {
            let mut edge = DependencyEdge::new(dep.source, node.id.clone());
            edge.reason = dep.reason;
            edge.style = dep.style;
            node.dependencies.push(edge);
        }
        node
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            title: node.title.clone(),
            dependencies: node
                .dependencies
                .iter()
                .map(|edge| DependencyRecord {
                    source: edge.source.clone(),
                    reason: edge.reason.clone(),
                    style: edge.style.clone(),
                })
                .collect(),
        }
    }
}

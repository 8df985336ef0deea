//! # Network Graph
//!
//! The typed, undirected co-occurrence graph.
//!
//! All data structures use `BTreeMap`/`BTreeSet` for deterministic ordering.
//! Every insertion checks the graph invariants and fails loudly:
//! - node ids are unique
//! - nodes are observed at least once
//! - edges never loop and always reference existing nodes

use crate::{GraphEdge, GraphNode, NodeId, NodeKind, SentinetError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The co-occurrence network: a node map plus an edge set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    /// Node storage: NodeId -> GraphNode
    nodes: BTreeMap<NodeId, GraphNode>,

    /// Undirected edges, normalized so each pair is stored once
    edges: BTreeSet<GraphEdge>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node.
    ///
    /// # Errors
    /// - `ZeroOccurrence` if the node was never observed
    /// - `NodeCollision` if a node with the same id exists
    pub fn insert_node(&mut self, node: GraphNode) -> Result<(), SentinetError> {
        if node.occurrence_count == 0 {
            return Err(SentinetError::ZeroOccurrence(node.id));
        }
        if self.nodes.contains_key(&node.id) {
            return Err(SentinetError::NodeCollision(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Insert an undirected edge. Returns `false` if the edge already existed.
    ///
    /// # Errors
    /// - `SelfLoop` if both endpoints are the same node
    /// - `DanglingEdge` if either endpoint is missing
    pub fn insert_edge(&mut self, a: &NodeId, b: &NodeId) -> Result<bool, SentinetError> {
        if !self.nodes.contains_key(a) || !self.nodes.contains_key(b) {
            return Err(SentinetError::DanglingEdge(a.clone(), b.clone()));
        }
        let edge = GraphEdge::new(a.clone(), b.clone())?;
        Ok(self.edges.insert(edge))
    }

    /// Lookup a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Check if the graph contains a node.
    #[must_use]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check if the graph contains the edge `{a, b}` (in either order).
    #[must_use]
    pub fn contains_edge(&self, a: &NodeId, b: &NodeId) -> bool {
        GraphEdge::new(a.clone(), b.clone()).is_ok_and(|edge| self.edges.contains(&edge))
    }

    /// Get all nodes in deterministic order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Get all node ids in deterministic order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Nodes of one kind, in id order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values().filter(move |n| n.kind() == kind)
    }

    /// Get all edges in deterministic order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Neighbors of a node, sorted.
    pub fn neighbors<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges.iter().filter_map(move |e| e.other(id))
    }

    /// Number of edges touching a node.
    #[must_use]
    pub fn degree(&self, id: &NodeId) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// Get the total number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// An empty graph is the "no data" state, not an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

/// Serializable form of the graph, used by the render adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SerializableGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl From<&Graph> for SerializableGraph {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            edges: graph
                .edges()
                .map(|e| (e.a().clone(), e.b().clone()))
                .collect(),
        }
    }
}

impl TryFrom<SerializableGraph> for Graph {
    type Error = SentinetError;

    /// Rebuild a graph, re-checking every invariant.
    fn try_from(serializable: SerializableGraph) -> Result<Self, Self::Error> {
        let mut graph = Graph::new();
        for node in serializable.nodes {
            graph.insert_node(node)?;
        }
        for (a, b) in &serializable.edges {
            graph.insert_edge(a, b)?;
        }
        Ok(graph)
    }
}

// =============================================================================
// TESTS
// =============================================================================

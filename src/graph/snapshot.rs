use std::collections::HashMap;
use std::fmt;

use log::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<u64> for DocumentId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    pub id: DocumentId,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: DocumentId,
    pub target: DocumentId,
}

/// Read-only node/edge set for one viewing session.
///
/// Edges are resolved to node indices on construction. Edges whose endpoints
/// are not in the node set, and self-loops, are dropped here so nothing
/// downstream has to re-check them.
#[derive(Clone, Debug)]
pub struct GraphSnapshot {
    nodes: Vec<GraphNode>,
    edges: Vec<(usize, usize)>,
    dropped_edges: usize,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        let mut unique_nodes = Vec::with_capacity(nodes.len());
        for node in nodes {
            if index_by_id.contains_key(&node.id) {
                warn!("duplicate document id {} in graph snapshot; keeping first", node.id);
                continue;
            }
            index_by_id.insert(node.id.clone(), unique_nodes.len());
            unique_nodes.push(node);
        }

        let edge_total = edges.len();
        let resolved = edges
            .iter()
            .filter_map(|edge| {
                let source = index_by_id.get(&edge.source).copied()?;
                let target = index_by_id.get(&edge.target).copied()?;
                (source != target).then_some((source, target))
            })
            .collect::<Vec<_>>();

        let dropped_edges = edge_total - resolved.len();
        if dropped_edges > 0 {
            debug!("dropped {dropped_edges} of {edge_total} edges with unknown endpoints or self-loops");
        }

        Self {
            nodes: unique_nodes,
            edges: resolved,
            dropped_edges,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }
}

//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of a projected graph topology for
//! algorithm execution.

use std::collections::HashMap;

/// Opaque node identifier carried through a projection.
///
/// The caller maps its own node ids (whatever they are) to `u64` when
/// building the view and back when reading results.
pub type NodeId = u64;

/// A dense, integer-indexed, undirected weighted view of a graph.
///
/// Community detection iterates nodes and neighbors tightly; the store's
/// hash-map layout is good for random access but slow for dense iteration.
/// This view maps node ids to dense indices (0..N) and stores the topology
/// as a weighted adjacency list. Each undirected edge appears in the
/// neighbor lists of both endpoints.
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,
    /// Weighted neighbors: index -> vec![(neighbor_index, weight)]
    pub neighbors: Vec<Vec<(usize, f64)>>,
}

impl GraphView {
    /// Create an empty view over a fixed node set.
    pub fn with_nodes(nodes: Vec<NodeId>) -> Self {
        let mut node_to_index = HashMap::with_capacity(nodes.len());
        for (idx, &id) in nodes.iter().enumerate() {
            node_to_index.insert(id, idx);
        }
        let node_count = nodes.len();
        Self {
            node_count,
            index_to_node: nodes,
            node_to_index,
            neighbors: vec![Vec::new(); node_count],
        }
    }

    /// Add an undirected weighted edge between two node ids.
    ///
    /// Ids not present in the node set are ignored, matching projection
    /// semantics where edges leaving the projected subgraph are dropped.
    pub fn add_undirected_edge(&mut self, a: NodeId, b: NodeId, weight: f64) {
        let (Some(&ai), Some(&bi)) = (self.node_to_index.get(&a), self.node_to_index.get(&b))
        else {
            return;
        };
        if ai == bi {
            return;
        }
        self.neighbors[ai].push((bi, weight));
        self.neighbors[bi].push((ai, weight));
    }

    /// Get the weighted degree of a node (by index)
    pub fn weighted_degree(&self, idx: usize) -> f64 {
        self.neighbors[idx].iter().map(|&(_, w)| w).sum()
    }

    /// Total weight of all undirected edges in the view
    pub fn total_weight(&self) -> f64 {
        // Each edge is stored twice, once per endpoint.
        self.neighbors
            .iter()
            .flat_map(|n| n.iter().map(|&(_, w)| w))
            .sum::<f64>()
            / 2.0
    }
}

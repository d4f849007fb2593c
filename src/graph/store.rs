//! In-memory graph storage
//!
//! Hash-indexed storage for the movie graph: nodes and directed edges with
//! label, edge-type and adjacency indices. The store is pre-loaded once
//! from the dataset; the engines borrow it per session. The only mutation
//! the query layer performs is the merge-style edge upsert backing the
//! director-influence operation, so there is no delete path.

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyMap;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory property graph store
#[derive(Debug, Default)]
pub struct GraphStore {
    /// Node storage: NodeId -> Node
    nodes: FxHashMap<NodeId, Node>,

    /// Edge storage: EdgeId -> Edge
    edges: FxHashMap<EdgeId, Edge>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: FxHashMap<NodeId, Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list)
    incoming: FxHashMap<NodeId, Vec<EdgeId>>,

    /// Label index for fast lookups
    label_index: FxHashMap<Label, FxHashSet<NodeId>>,

    /// Edge type index for fast lookups
    edge_type_index: FxHashMap<EdgeType, FxHashSet<EdgeId>>,

    next_node_id: u64,
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self {
            next_node_id: 1,
            next_edge_id: 1,
            ..Default::default()
        }
    }

    /// Create a node with auto-generated ID and single label
    pub fn create_node(&mut self, label: impl Into<Label>) -> NodeId {
        self.create_node_with_properties(label, PropertyMap::new())
    }

    /// Create a node with a label and properties
    pub fn create_node_with_properties(
        &mut self,
        label: impl Into<Label>,
        properties: PropertyMap,
    ) -> NodeId {
        let node_id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;

        let label = label.into();
        let node = Node::new_with_properties(node_id, label.clone(), properties);

        self.label_index.entry(label).or_default().insert(node_id);
        self.outgoing.insert(node_id, Vec::new());
        self.incoming.insert(node_id, Vec::new());
        self.nodes.insert(node_id, node);
        node_id
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Create an edge between two nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        let edge_type = edge_type.into();
        let edge = Edge::new(edge_id, source, target, edge_type.clone());

        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(target).or_default().push(edge_id);
        self.edge_type_index
            .entry(edge_type)
            .or_default()
            .insert(edge_id);
        self.edges.insert(edge_id, edge);
        Ok(edge_id)
    }

    /// Find an existing edge of a type between an ordered node pair.
    pub fn find_edge(
        &self,
        source: NodeId,
        target: NodeId,
        edge_type: &EdgeType,
    ) -> Option<EdgeId> {
        self.outgoing.get(&source)?.iter().copied().find(|id| {
            self.edges
                .get(id)
                .is_some_and(|e| e.target == target && e.edge_type == *edge_type)
        })
    }

    /// Merge-style edge upsert: create the edge unless one of the same type
    /// already connects the ordered pair. Returns the edge id and whether a
    /// new edge was created.
    pub fn merge_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<(EdgeId, bool)> {
        let edge_type = edge_type.into();
        if let Some(existing) = self.find_edge(source, target, &edge_type) {
            return Ok((existing, false));
        }
        let id = self.create_edge(source, target, edge_type)?;
        Ok((id, true))
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(&node_id)
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Edges touching a node in either direction, for undirected traversal.
    pub fn get_edges_of(&self, node_id: NodeId) -> Vec<&Edge> {
        let mut edges = self.get_outgoing_edges(node_id);
        edges.extend(self.get_incoming_edges(node_id));
        edges
    }

    /// Get all nodes with a specific label
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| {
                let mut nodes: Vec<&Node> =
                    ids.iter().filter_map(|id| self.nodes.get(id)).collect();
                // Hash-set iteration order is arbitrary; callers rely on a
                // stable scan order.
                nodes.sort_by_key(|n| n.id);
                nodes
            })
            .unwrap_or_default()
    }

    /// Get all edges of a specific type
    pub fn get_edges_by_type(&self, edge_type: &EdgeType) -> Vec<&Edge> {
        self.edge_type_index
            .get(edge_type)
            .map(|ids| {
                let mut edges: Vec<&Edge> =
                    ids.iter().filter_map(|id| self.edges.get(id)).collect();
                edges.sort_by_key(|e| e.id);
                edges
            })
            .unwrap_or_default()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

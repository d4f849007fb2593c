//! Edge implementation for the property graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge in the property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Relationship type (e.g. "A_JOUE")
    pub edge_type: EdgeType,

    /// Properties associated with this edge
    pub properties: PropertyMap,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, edge_type: impl Into<EdgeType>) -> Self {
        Edge {
            id,
            source,
            target,
            edge_type: edge_type.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Given one endpoint, the other. `None` when the node is not on this
    /// edge; used by undirected traversals.
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_basics() {
        let mut edge = Edge::new(EdgeId::new(1), NodeId::new(10), NodeId::new(20), "A_JOUE");
        assert_eq!(edge.edge_type.as_str(), "A_JOUE");

        edge.set_property("billing", 1i64);
        assert_eq!(edge.get_property("billing").unwrap().as_integer(), Some(1));
    }

    #[test]
    fn test_other_endpoint() {
        let edge = Edge::new(EdgeId::new(2), NodeId::new(1), NodeId::new(2), "A_JOUE");
        assert_eq!(edge.other_endpoint(NodeId::new(1)), Some(NodeId::new(2)));
        assert_eq!(edge.other_endpoint(NodeId::new(2)), Some(NodeId::new(1)));
        assert_eq!(edge.other_endpoint(NodeId::new(3)), None);
    }
}

//! Node implementation for the property graph

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node in the property graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Set of labels for this node
    pub labels: HashSet<Label>,

    /// Properties associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with a single label
    pub fn new(id: NodeId, label: impl Into<Label>) -> Self {
        let mut labels = HashSet::new();
        labels.insert(label.into());
        Node {
            id,
            labels,
            properties: PropertyMap::new(),
        }
    }

    /// Create a new node with a label and properties
    pub fn new_with_properties(
        id: NodeId,
        label: impl Into<Label>,
        properties: PropertyMap,
    ) -> Self {
        let mut node = Node::new(id, label);
        node.properties = properties;
        node
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The node's `name` property, falling back to `title`.
    ///
    /// Actors, directors and genres carry a name; films carry a title. Path
    /// rendering and result records use whichever is available.
    pub fn display_name(&self) -> Option<&str> {
        self.get_property("name")
            .or_else(|| self.get_property("title"))
            .and_then(|v| v.as_string())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_labels_and_properties() {
        let mut node = Node::new(NodeId::new(1), "Actor");
        assert!(node.has_label(&Label::new("Actor")));
        assert!(!node.has_label(&Label::new("Genre")));

        node.set_property("name", "Anne Hathaway");
        assert_eq!(
            node.get_property("name").unwrap().as_string(),
            Some("Anne Hathaway")
        );
        assert!(node.has_property("name"));
        assert!(!node.has_property("title"));
    }

    #[test]
    fn test_display_name_prefers_name_over_title() {
        let mut film = Node::new(NodeId::new(2), "films");
        assert_eq!(film.display_name(), None);

        film.set_property("title", "Interstellar");
        assert_eq!(film.display_name(), Some("Interstellar"));

        film.set_property("name", "also named");
        assert_eq!(film.display_name(), Some("also named"));
    }

    #[test]
    fn test_node_equality_by_id() {
        let a = Node::new(NodeId::new(7), "Actor");
        let b = Node::new(NodeId::new(7), "Genre");
        assert_eq!(a, b);
    }
}

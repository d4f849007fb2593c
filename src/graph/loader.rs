//! Graph construction from the film dataset
//!
//! Derives the property graph from the same documents the collection
//! holds: one `films` node per document, `Actor`/`Realisateur`/`Genre`
//! nodes deduplicated by name, and the `A_JOUE`/`A_REALISE`/`A_GENRE`
//! relationships between them. `INFLUENCE_PAR` is never created here.

use super::property::{PropertyMap, PropertyValue};
use super::store::{GraphResult, GraphStore};
use super::types::NodeId;
use super::{EDGE_ACTED_IN, EDGE_DIRECTED, EDGE_HAS_GENRE};
use super::{LABEL_ACTOR, LABEL_DIRECTOR, LABEL_FILM, LABEL_GENRE};
use crate::document::{split_genres, Document, FIELD_ACTORS, FIELD_DIRECTOR, FIELD_GENRE};
use rustc_hash::FxHashMap;
use tracing::info;

/// Film properties carried onto the `films` node verbatim (revenue keeps
/// its string form when the document held one).
const FILM_PROPERTIES: [&str; 6] = [
    "title",
    "year",
    "rating",
    "Votes",
    "Runtime (Minutes)",
    "Revenue (Millions)",
];

fn named_node(
    store: &mut GraphStore,
    index: &mut FxHashMap<String, NodeId>,
    label: &str,
    name: &str,
) -> NodeId {
    if let Some(&id) = index.get(name) {
        return id;
    }
    let mut props = PropertyMap::new();
    props.insert("name".to_string(), PropertyValue::from(name));
    let id = store.create_node_with_properties(label, props);
    index.insert(name.to_string(), id);
    id
}

/// Build the movie graph from a slice of film documents.
pub fn load_graph(documents: &[Document]) -> GraphResult<GraphStore> {
    let mut store = GraphStore::new();
    let mut actors: FxHashMap<String, NodeId> = FxHashMap::default();
    let mut directors: FxHashMap<String, NodeId> = FxHashMap::default();
    let mut genres: FxHashMap<String, NodeId> = FxHashMap::default();

    for doc in documents {
        let mut props = PropertyMap::new();
        for field in FILM_PROPERTIES {
            if let Some(value) = doc.get(field) {
                if !value.is_null() {
                    props.insert(field.to_string(), PropertyValue::from(value));
                }
            }
        }
        let film = store.create_node_with_properties(LABEL_FILM, props);

        if let Some(raw) = doc.get(FIELD_ACTORS).and_then(|v| v.as_str()) {
            for actor in split_names(raw) {
                let id = named_node(&mut store, &mut actors, LABEL_ACTOR, &actor);
                store.merge_edge(id, film, EDGE_ACTED_IN)?;
            }
        }

        if let Some(name) = doc.get(FIELD_DIRECTOR).and_then(|v| v.as_str()) {
            let id = named_node(&mut store, &mut directors, LABEL_DIRECTOR, name.trim());
            store.merge_edge(id, film, EDGE_DIRECTED)?;
        }

        if let Some(raw) = doc.get(FIELD_GENRE).and_then(|v| v.as_str()) {
            for genre in split_genres(raw) {
                let id = named_node(&mut store, &mut genres, LABEL_GENRE, &genre);
                store.merge_edge(film, id, EDGE_HAS_GENRE)?;
            }
        }
    }

    info!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        films = documents.len(),
        "built movie graph from dataset"
    );
    Ok(store)
}

/// Actor lists use the same comma-separated convention as genres.
fn split_names(raw: &str) -> Vec<String> {
    split_genres(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocValue;
    use crate::graph::types::{EdgeType, Label};

    fn film(title: &str, actors: &str, director: &str, genre: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("title".to_string(), DocValue::from(title));
        doc.insert("Actors".to_string(), DocValue::from(actors));
        doc.insert("Director".to_string(), DocValue::from(director));
        doc.insert("genre".to_string(), DocValue::from(genre));
        doc
    }

    #[test]
    fn test_load_graph_dedupes_names() {
        let docs = vec![
            film("A", "X, Y", "D1", "Action, Drama"),
            film("B", "Y, Z", "D1", "Action"),
        ];
        let store = load_graph(&docs).unwrap();

        assert_eq!(store.get_nodes_by_label(&Label::new(LABEL_FILM)).len(), 2);
        assert_eq!(store.get_nodes_by_label(&Label::new(LABEL_ACTOR)).len(), 3);
        assert_eq!(
            store.get_nodes_by_label(&Label::new(LABEL_DIRECTOR)).len(),
            1
        );
        assert_eq!(store.get_nodes_by_label(&Label::new(LABEL_GENRE)).len(), 2);

        assert_eq!(store.get_edges_by_type(&EdgeType::new(EDGE_ACTED_IN)).len(), 4);
        assert_eq!(store.get_edges_by_type(&EdgeType::new(EDGE_DIRECTED)).len(), 2);
        assert_eq!(store.get_edges_by_type(&EdgeType::new(EDGE_HAS_GENRE)).len(), 3);
    }

    #[test]
    fn test_film_properties_keep_source_types() {
        let mut doc = film("A", "X", "D", "Action");
        doc.insert(
            "Revenue (Millions)".to_string(),
            DocValue::from("123.45"),
        );
        doc.insert("year".to_string(), DocValue::Integer(2008));

        let store = load_graph(&[doc]).unwrap();
        let films = store.get_nodes_by_label(&Label::new(LABEL_FILM));
        let node = films[0];

        assert_eq!(
            node.get_property("Revenue (Millions)").unwrap().as_string(),
            Some("123.45")
        );
        assert_eq!(node.get_property("year").unwrap().as_integer(), Some(2008));
    }

    #[test]
    fn test_missing_fields_tolerated() {
        let mut doc = Document::new();
        doc.insert("title".to_string(), DocValue::from("Orphan"));
        let store = load_graph(&[doc]).unwrap();
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.edge_count(), 0);
    }
}

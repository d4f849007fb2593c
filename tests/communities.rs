//! Actor community detection over a loaded dataset.

#![cfg(feature = "graph-algorithms")]

use cinegraph::detect_actor_communities;
use cinegraph::document::{DocValue, Document};
use cinegraph::graph::load_graph;

fn film(title: &str, actors: &str) -> Document {
    let mut doc = Document::new();
    doc.insert("title".to_string(), DocValue::from(title));
    doc.insert("Actors".to_string(), DocValue::from(actors));
    doc
}

#[test]
fn ensembles_split_into_communities() {
    // Two tight troupes and one loner.
    let docs = vec![
        film("N1", "Ana, Ben, Cora"),
        film("N2", "Ana, Ben"),
        film("N3", "Ben, Cora"),
        film("S1", "Uma, Vic, Wes"),
        film("S2", "Uma, Vic"),
        film("S3", "Vic, Wes"),
        film("Solo", "Zed"),
    ];
    let store = load_graph(&docs).unwrap();

    let rows = detect_actor_communities(&store).unwrap();
    assert_eq!(rows.len(), 7);

    let community_of = |name: &str| {
        rows.iter()
            .find(|r| r.actor == name)
            .map(|r| r.community)
            .unwrap()
    };

    assert_eq!(community_of("Ana"), community_of("Ben"));
    assert_eq!(community_of("Ben"), community_of("Cora"));
    assert_eq!(community_of("Uma"), community_of("Vic"));
    assert_eq!(community_of("Vic"), community_of("Wes"));
    assert_ne!(community_of("Ana"), community_of("Uma"));
    assert_ne!(community_of("Zed"), community_of("Ana"));
    assert_ne!(community_of("Zed"), community_of("Uma"));
}

#[test]
fn deterministic_across_runs() {
    let docs = vec![
        film("A", "P, Q"),
        film("B", "Q, R"),
        film("C", "R, P"),
        film("D", "X, Y"),
    ];
    let store = load_graph(&docs).unwrap();

    let first = detect_actor_communities(&store).unwrap();
    let second = detect_actor_communities(&store).unwrap();
    assert_eq!(first, second);
}

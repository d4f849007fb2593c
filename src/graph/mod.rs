//! Property graph of actors, films, directors and genres: the graph model,
//! the in-memory store, the dataset-derived loader, and the query engine.

pub mod edge;
pub mod engine;
pub mod loader;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

pub use edge::Edge;
pub use loader::load_graph;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};

/// Node labels of the movie graph. `films` is lowercase in the dataset.
pub const LABEL_ACTOR: &str = "Actor";
pub const LABEL_FILM: &str = "films";
pub const LABEL_DIRECTOR: &str = "Realisateur";
pub const LABEL_GENRE: &str = "Genre";

/// Relationship types. `INFLUENCE_PAR` is derived data, created only by the
/// explicit influence mutation and implied by nothing else.
pub const EDGE_ACTED_IN: &str = "A_JOUE";
pub const EDGE_DIRECTED: &str = "A_REALISE";
pub const EDGE_HAS_GENRE: &str = "A_GENRE";
pub const EDGE_INFLUENCED_BY: &str = "INFLUENCE_PAR";

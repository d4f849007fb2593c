//! CineGraph: exploratory movie analytics over a film dataset.
//!
//! Two engines answer the dashboard's questions. The document engine runs
//! aggregations over loosely-typed film documents (yearly counts, averages,
//! per-genre rollups, correlations). The graph engine works a property
//! graph of actors, films, directors and genres derived from the same
//! dataset (collaborations, rankings, a director-influence derivation,
//! shortest collaboration paths, and optional Louvain community detection).
//!
//! The dataset is famously dirty: numeric fields arrive as numbers or
//! strings, fields go missing, and `"N/A"` stands in for absent revenue.
//! Both engines coerce what they can and skip what they cannot; malformed
//! values never abort a question.

pub mod algo;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod stats;

pub use algo::{detect_actor_communities, ActorCommunity};
pub use config::DashboardConfig;
pub use document::{load_collection, Collection, DocumentSource};
pub use error::{EngineError, EngineResult};
pub use graph::{load_graph, GraphStore};

/// Crate version, from the build manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the current version of the library
pub fn version() -> &'static str {
    VERSION
}

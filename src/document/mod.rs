//! Film document collection: loosely-typed documents, the session-handle
//! seam to the document store, and the aggregation engine.

pub mod collection;
pub mod engine;
pub mod value;

pub use collection::{load_collection, Collection, DocumentSource, StoreError, StoreResult};
pub use value::{split_genres, DocValue, Document, NumericField};

/// Field names of the film dataset. Presence of any field is never
/// guaranteed; the mixed casing is the dataset's, not ours.
pub const FIELD_TITLE: &str = "title";
pub const FIELD_YEAR: &str = "year";
pub const FIELD_GENRE: &str = "genre";
pub const FIELD_ACTORS: &str = "Actors";
pub const FIELD_DIRECTOR: &str = "Director";
pub const FIELD_RATING: &str = "rating";
pub const FIELD_VOTES: &str = "Votes";
pub const FIELD_RUNTIME: &str = "Runtime (Minutes)";
pub const FIELD_REVENUE: &str = "Revenue (Millions)";
pub const FIELD_METASCORE: &str = "Metascore";

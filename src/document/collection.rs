//! Collection handle and dataset loading
//!
//! [`DocumentSource`] is the seam between the aggregation engine and the
//! document store: the engine borrows a handle for the duration of a
//! question and never manages its lifecycle. The in-memory [`Collection`]
//! is the store this crate ships; a remote driver would implement the same
//! trait and surface `StoreError::Connection` when the session drops.

use super::value::{DocValue, Document};
use serde::de::Error as _;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors raised by a document store handle
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable or session rejected. Not retried.
    #[error("document store connection failed: {0}")]
    Connection(String),

    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A borrowed, session-scoped handle onto a collection of film documents.
pub trait DocumentSource {
    /// Materialize every document in the collection.
    fn scan(&self) -> StoreResult<Vec<Document>>;

    /// Distinct non-null values of one field, in first-seen order.
    fn distinct(&self, field: &str) -> StoreResult<Vec<DocValue>>;
}

/// In-memory film collection
#[derive(Debug, Clone, Default)]
pub struct Collection {
    name: String,
    documents: Vec<Document>,
}

impl Collection {
    pub fn new(name: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for Collection {
    fn scan(&self) -> StoreResult<Vec<Document>> {
        Ok(self.documents.clone())
    }

    fn distinct(&self, field: &str) -> StoreResult<Vec<DocValue>> {
        let mut seen = Vec::new();
        for doc in &self.documents {
            match doc.get(field) {
                None | Some(DocValue::Null) => continue,
                Some(value) => {
                    if !seen.contains(value) {
                        seen.push(value.clone());
                    }
                }
            }
        }
        Ok(seen)
    }
}

/// Load a film collection from a JSON array of documents.
pub fn load_collection(name: &str, path: impl AsRef<Path>) -> StoreResult<Collection> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let documents: Vec<Document> = serde_json::from_str(&raw)?;
    if documents.is_empty() {
        return Err(StoreError::Parse(serde_json::Error::custom(
            "dataset contains no documents",
        )));
    }

    info!(
        collection = name,
        documents = documents.len(),
        path = %path.display(),
        "loaded film collection"
    );
    Ok(Collection::new(name, documents))
}

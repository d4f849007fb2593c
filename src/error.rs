//! Crate-wide error taxonomy
//!
//! Connection failures and missing server capabilities are the only errors
//! the engines surface; malformed or missing field values are skipped
//! locally and never raised, and unknown entity names yield empty results.

use crate::document::StoreError;
use crate::graph::GraphError;
use thiserror::Error;

/// Errors surfaced by the aggregation and graph query engines
#[derive(Error, Debug)]
pub enum EngineError {
    /// The underlying document store rejected or lost the session. Callers
    /// display the error and skip the remaining questions for that store;
    /// there are no retries.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The graph store rejected an operation (invalid endpoint, unknown id).
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The deployment lacks an optional server capability. Local to the one
    /// operation that needs it; other operations keep working.
    #[error("server capability not available: {0}")]
    Unsupported(&'static str),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// True when the error means the whole store session is unusable and the
    /// caller should stop querying it.
    pub fn is_connection(&self) -> bool {
        matches!(self, EngineError::Store(StoreError::Connection(_)))
    }

    /// True when only an optional capability is missing.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, EngineError::Unsupported(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let conn = EngineError::Store(StoreError::Connection("refused".into()));
        assert!(conn.is_connection());
        assert!(!conn.is_unsupported());

        let unsupported = EngineError::Unsupported("community detection");
        assert!(unsupported.is_unsupported());
        assert!(!unsupported.is_connection());
    }
}

//! Loosely-typed document field values
//!
//! The film dataset is dirty on purpose: revenue arrives sometimes as a
//! number and sometimes as a string (including `"N/A"`), genres are a
//! comma-separated string, and any field may be missing. Numeric access
//! therefore goes through [`NumericField`], a tagged coercion result, so an
//! absent or malformed value can never be confused with zero.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A film document: an ordered map of loosely-typed fields.
pub type Document = IndexMap<String, DocValue>;

/// A single document field value.
///
/// Integer is tried before Float on deserialization, so JSON numbers that
/// fit an i64 stay integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl DocValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DocValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Coerce to f64: integers, floats, and numeric strings all pass;
    /// everything else is `None`. This is the double coercion the revenue
    /// field needs (already-numeric or numeric-as-string).
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            DocValue::Integer(i) => Some(*i as f64),
            DocValue::Float(f) => Some(*f),
            DocValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for DocValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocValue::Null => write!(f, "null"),
            DocValue::Boolean(b) => write!(f, "{}", b),
            DocValue::Integer(i) => write!(f, "{}", i),
            DocValue::Float(x) => write!(f, "{}", x),
            DocValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for DocValue {
    fn from(s: &str) -> Self {
        DocValue::String(s.to_string())
    }
}

impl From<String> for DocValue {
    fn from(s: String) -> Self {
        DocValue::String(s)
    }
}

impl From<i64> for DocValue {
    fn from(i: i64) -> Self {
        DocValue::Integer(i)
    }
}

impl From<f64> for DocValue {
    fn from(f: f64) -> Self {
        DocValue::Float(f)
    }
}

/// Tagged result of reading a document field as a number.
///
/// Aggregations treat `Absent` and `Malformed` identically (the document is
/// excluded, never counted as zero), but the distinction matters for
/// diagnostics and keeps the coercion rule explicit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    Present(f64),
    Absent,
    Malformed,
}

impl NumericField {
    /// Read `field` from `doc` with numeric coercion.
    pub fn of(doc: &Document, field: &str) -> Self {
        match doc.get(field) {
            None | Some(DocValue::Null) => NumericField::Absent,
            Some(value) => match value.coerce_f64() {
                Some(v) => NumericField::Present(v),
                None => NumericField::Malformed,
            },
        }
    }

    /// The value, if present and well-formed.
    pub fn value(self) -> Option<f64> {
        match self {
            NumericField::Present(v) => Some(v),
            _ => None,
        }
    }
}

/// Split a delimited genre string into trimmed, non-empty tokens.
///
/// Every consumer of the multi-valued genre field goes through here;
/// nothing re-splits downstream.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

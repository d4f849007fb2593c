//! Property value types for graph nodes and edges
//!
//! Film properties carry the dataset's looseness into the graph: revenue is
//! stored as whatever the source document held, number or string, so reads
//! that need arithmetic coerce explicitly via [`PropertyValue::coerce_f64`].

use crate::document::DocValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Property value on a node or edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric coercion: integers, floats, and numeric strings all pass.
    pub fn coerce_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(x) => write!(f, "{}", x),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<&DocValue> for PropertyValue {
    /// Carry a document field into the graph unchanged in type.
    fn from(value: &DocValue) -> Self {
        match value {
            DocValue::Null => PropertyValue::Null,
            DocValue::Boolean(b) => PropertyValue::Boolean(*b),
            DocValue::Integer(i) => PropertyValue::Integer(*i),
            DocValue::Float(f) => PropertyValue::Float(*f),
            DocValue::String(s) => PropertyValue::String(s.clone()),
        }
    }
}

/// Property map for nodes and edges
pub type PropertyMap = HashMap<String, PropertyValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(PropertyValue::from("x").as_string(), Some("x"));
        assert_eq!(PropertyValue::from(42i64).as_integer(), Some(42));
        assert_eq!(PropertyValue::from(1.5).as_float(), Some(1.5));
        assert!(PropertyValue::Null.is_null());
    }

    #[test]
    fn test_coerce_like_to_float() {
        assert_eq!(PropertyValue::from(42i64).coerce_f64(), Some(42.0));
        assert_eq!(PropertyValue::from("292.57").coerce_f64(), Some(292.57));
        assert_eq!(PropertyValue::from("N/A").coerce_f64(), None);
        assert_eq!(PropertyValue::Null.coerce_f64(), None);
    }

    #[test]
    fn test_from_doc_value_preserves_type() {
        let revenue = DocValue::from("12.5");
        let prop = PropertyValue::from(&revenue);
        // Stays a string in the graph; coercion happens at read time.
        assert_eq!(prop.as_string(), Some("12.5"));
        assert_eq!(prop.coerce_f64(), Some(12.5));
    }
}

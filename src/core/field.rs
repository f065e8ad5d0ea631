//! Field value types used for attribute lookups

use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
}

impl FieldValue {
    /// Compare against the textual form used in attribute lookups.
    ///
    /// Strings compare exactly and UUIDs after parsing (case-insensitive).
    /// Floats compare numerically, so `"250"` matches `250.0`. Integers and
    /// booleans compare with their `to_string()` form.
    pub fn matches_str(&self, value: &str) -> bool {
        match self {
            FieldValue::String(s) => s == value,
            FieldValue::Uuid(u) => Uuid::parse_str(value).is_ok_and(|parsed| parsed == *u),
            FieldValue::Integer(i) => i.to_string() == value,
            FieldValue::Float(f) => value.parse::<f64>().is_ok_and(|parsed| parsed == *f),
            FieldValue::Boolean(b) => b.to_string() == value,
        }
    }
}

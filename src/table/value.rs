//! # Cell Values
//!
//! Typed scalars stored in a loaded table and the row records
//! handed back to callers.

use std::cmp::Ordering;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single typed cell.
///
/// Every cell of a column carries the same variant, fixed at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    /// Native ordering: lexicographic for text, numeric otherwise.
    ///
    /// Mixed variants never occur inside one column; they fall back to
    /// variant rank so the ordering stays total.
    pub fn compare(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            (Scalar::Integer(a), Scalar::Integer(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Integer(_) => 0,
            Scalar::Float(_) => 1,
            Scalar::Text(_) => 2,
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Text(s) => serializer.serialize_str(s),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

/// One row rendered as an ordered `column -> value` mapping.
///
/// Field order follows the source table's header.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    fields: Vec<(String, Scalar)>,
}

impl RowRecord {
    pub fn new(fields: Vec<(String, Scalar)>) -> Self {
        Self { fields }
    }

    /// Look up a value by column name
    pub fn get(&self, column: &str) -> Option<&Scalar> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &[(String, Scalar)] {
        &self.fields
    }
}

impl Serialize for RowRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

//! # Multi-key Sort
//!
//! Sort tokens look like `field`, `field_asc` or `field_desc`. Keys
//! are applied as one composite, stable comparison.

use std::cmp::Ordering;

use crate::table::{Scalar, Table};

use super::errors::{QueryError, QueryResult};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a `sort_by` token.
    ///
    /// The token is split on its last underscore. A suffix of `asc` or
    /// `desc` (any case) is the direction; otherwise the whole token is
    /// the field and the direction is descending.
    pub fn parse(token: &str) -> QueryResult<Self> {
        if token.is_empty() {
            return Err(QueryError::Malformed("empty sort field".to_string()));
        }

        let key = match token.rsplit_once('_') {
            Some((field, suffix)) => match SortDirection::from_token(suffix) {
                Some(direction) => SortKey {
                    field: field.to_string(),
                    direction,
                },
                None => SortKey::desc(token),
            },
            None => SortKey::desc(token),
        };

        if key.field.is_empty() {
            return Err(QueryError::Malformed(format!(
                "wrong sort value \"{}\"",
                token
            )));
        }

        Ok(key)
    }

    /// Resolve the field for `table`.
    pub fn bind(&self, table: &Table) -> QueryResult<BoundSortKey> {
        let (index, _) = table
            .column(&self.field)
            .ok_or_else(|| QueryError::unknown_column(&self.field, table.name()))?;

        Ok(BoundSortKey {
            index,
            direction: self.direction,
        })
    }
}

/// A key resolved against one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundSortKey {
    index: usize,
    direction: SortDirection,
}

/// Order the rows of `table` by `keys`, first key most significant.
pub fn sort(table: Table, keys: &[SortKey]) -> QueryResult<Table> {
    let bound = keys
        .iter()
        .map(|key| key.bind(&table))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(apply_sort(table, &bound))
}

pub(crate) fn apply_sort(table: Table, keys: &[BoundSortKey]) -> Table {
    if keys.is_empty() {
        return table;
    }

    let mut rows = table.rows().to_vec();
    // slice::sort_by is stable; fully tied rows keep input order
    rows.sort_by(|a, b| compare_rows(a, b, keys));
    table.with_rows(rows)
}

fn compare_rows(a: &[Scalar], b: &[Scalar], keys: &[BoundSortKey]) -> Ordering {
    keys.iter()
        .map(|key| key.direction.apply(a[key.index].compare(&b[key.index])))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

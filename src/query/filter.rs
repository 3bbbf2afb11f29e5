//! # Equality Filters
//!
//! A filter clause pairs a column with a literal. The literal is parsed
//! once against the column's inferred type, then compared to every row.

use crate::table::{Scalar, Table};

use super::errors::{QueryError, QueryResult};

/// `column == literal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub column: String,
    pub literal: String,
}

impl FilterClause {
    pub fn new(column: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            literal: literal.into(),
        }
    }

    /// Zip parallel key/value lists into clauses.
    ///
    /// Any length mismatch is rejected before a clause is looked at.
    pub fn pair(keys: &[String], values: &[String]) -> QueryResult<Vec<FilterClause>> {
        if keys.len() != values.len() {
            return Err(QueryError::Malformed("filter length mismatch".to_string()));
        }

        Ok(keys
            .iter()
            .zip(values)
            .map(|(k, v)| FilterClause::new(k.clone(), v.clone()))
            .collect())
    }

    /// Resolve the column and parse the literal for `table`.
    pub fn bind(&self, table: &Table) -> QueryResult<BoundFilter> {
        let (index, column) = table
            .column(&self.column)
            .ok_or_else(|| QueryError::unknown_column(&self.column, table.name()))?;

        let expected = column.column_type.parse(&self.literal).ok_or_else(|| {
            QueryError::Malformed(format!(
                "filter value \"{}\" is not a valid {} for field \"{}\"",
                self.literal,
                column.column_type.as_str(),
                self.column
            ))
        })?;

        Ok(BoundFilter { index, expected })
    }
}

/// A clause resolved against one table
#[derive(Debug, Clone, PartialEq)]
pub struct BoundFilter {
    index: usize,
    expected: Scalar,
}

impl BoundFilter {
    pub fn matches(&self, row: &[Scalar]) -> bool {
        row.get(self.index) == Some(&self.expected)
    }
}

/// Keep the rows of `table` satisfying every clause, in source order.
pub fn filter(table: Table, clauses: &[FilterClause]) -> QueryResult<Table> {
    let bound = clauses
        .iter()
        .map(|clause| clause.bind(&table))
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(apply_filters(table, &bound))
}

pub(crate) fn apply_filters(table: Table, bound: &[BoundFilter]) -> Table {
    if bound.is_empty() {
        return table;
    }

    let rows = table
        .rows()
        .iter()
        .filter(|row| bound.iter().all(|f| f.matches(row)))
        .cloned()
        .collect();
    table.with_rows(rows)
}

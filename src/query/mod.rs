//! # Query Engine
//!
//! Equality filtering and multi-key sorting over a loaded `Table`.
//!
//! A `Query` is validated against the table in full (every filter
//! column, literal and sort field) before any row is touched.

pub mod errors;
pub mod filter;
pub mod sort;

pub use errors::{QueryError, QueryResult};
pub use filter::{filter, FilterClause};
pub use sort::{sort, SortDirection, SortKey};

use crate::table::Table;

/// Filters followed by sort keys. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<FilterClause>,
    pub sort: Vec<SortKey>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, column: impl Into<String>, literal: impl Into<String>) -> Self {
        self.filters.push(FilterClause::new(column, literal));
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Build a query from the raw request lists
    /// (`filter_key`, `filter_value`, `sort_by`).
    pub fn from_params(
        filter_keys: &[String],
        filter_values: &[String],
        sort_tokens: &[String],
    ) -> QueryResult<Self> {
        let filters = FilterClause::pair(filter_keys, filter_values)?;
        let sort = sort_tokens
            .iter()
            .map(|token| SortKey::parse(token))
            .collect::<QueryResult<Vec<_>>>()?;

        Ok(Self { filters, sort })
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty() && self.sort.is_empty()
    }

    /// Filter then sort `table`.
    pub fn execute(&self, table: Table) -> QueryResult<Table> {
        let filters = self
            .filters
            .iter()
            .map(|clause| clause.bind(&table))
            .collect::<QueryResult<Vec<_>>>()?;
        let keys = self
            .sort
            .iter()
            .map(|key| key.bind(&table))
            .collect::<QueryResult<Vec<_>>>()?;

        let table = filter::apply_filters(table, &filters);
        Ok(sort::apply_sort(table, &keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Scalar, TableLoader};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn tornados() -> Table {
        TableLoader::load(
            "t.csv",
            b"yr,mo,dy\n1950,12,3\n1950,12,1\n1951,1,5\n",
        )
        .unwrap()
    }

    #[test]
    fn test_filter_then_sort() {
        let query = Query::from_params(&strings(&["yr"]), &strings(&["1950"]), &strings(&["dy_asc"]))
            .unwrap();
        let result = query.execute(tornados()).unwrap();

        let days: Vec<&Scalar> = result.rows().iter().map(|r| &r[2]).collect();
        assert_eq!(days, vec![&Scalar::Integer(1), &Scalar::Integer(3)]);
    }

    #[test]
    fn test_default_direction_is_descending() {
        let query = Query::new().filter("yr", "1950").sort_by(SortKey::parse("dy").unwrap());
        let result = query.execute(tornados()).unwrap();

        let days: Vec<&Scalar> = result.rows().iter().map(|r| &r[2]).collect();
        assert_eq!(days, vec![&Scalar::Integer(3), &Scalar::Integer(1)]);
    }

    #[test]
    fn test_length_mismatch_regardless_of_content() {
        let err = Query::from_params(&strings(&["yr", "mo"]), &strings(&["1950"]), &[]).unwrap_err();
        assert!(matches!(err, QueryError::Malformed(_)));

        let err = Query::from_params(&strings(&["yr"]), &[], &[]).unwrap_err();
        assert!(matches!(err, QueryError::Malformed(_)));
    }

    #[test]
    fn test_unknown_sort_field_fails_even_if_filter_matches_nothing() {
        let query = Query::new().filter("yr", "2000").sort_by(SortKey::asc("zz"));
        let err = query.execute(tornados()).unwrap_err();
        assert_eq!(err, QueryError::unknown_column("zz", "t.csv"));
    }

    #[test]
    fn test_empty_query_returns_table_unchanged() {
        let query = Query::new();
        assert!(query.is_empty());

        let result = query.execute(tornados()).unwrap();
        assert_eq!(result.len(), 3);
    }
}

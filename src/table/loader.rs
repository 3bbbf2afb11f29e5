//! # Table Loader
//!
//! Parses a CSV blob (header row + records) into a typed `Table`.
//! Empty cells are zero-filled before type inference so no missing
//! value reaches query evaluation.

use std::collections::HashSet;

use super::column::{Column, ColumnType};
use super::errors::{TableError, TableResult};
use super::value::{RowRecord, Scalar};

/// Literal substituted for an empty cell
pub const ZERO_FILL: &str = "0";

/// A loaded table. Rows keep file order.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Scalar>>,
}

impl Table {
    /// Filename the table was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Position and definition of a column, if present
    pub fn column(&self, name: &str) -> Option<(usize, &Column)> {
        self.columns.iter().enumerate().find(|(_, c)| c.name == name)
    }

    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Same table with its rows replaced
    pub fn with_rows(self, rows: Vec<Vec<Scalar>>) -> Self {
        Self { rows, ..self }
    }

    /// Render every row as a name -> value record
    pub fn into_records(self) -> Vec<RowRecord> {
        let names = self.column_names();
        self.rows
            .into_iter()
            .map(|row| RowRecord::new(names.iter().cloned().zip(row).collect()))
            .collect()
    }
}

/// Builds tables from raw CSV bytes
pub struct TableLoader;

impl TableLoader {
    /// Parse `data` as the table called `name`.
    ///
    /// Fails with `TableError::Malformed` on ragged rows, invalid UTF-8,
    /// a missing header or duplicate column names.
    pub fn load(name: &str, data: &[u8]) -> TableResult<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);

        let header: Vec<String> = reader
            .headers()
            .map_err(|e| TableError::malformed(name, e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        if header.is_empty() {
            return Err(TableError::malformed(name, "missing header row"));
        }

        let mut seen = HashSet::new();
        for column in &header {
            if !seen.insert(column.as_str()) {
                return Err(TableError::malformed(
                    name,
                    format!("duplicate column \"{}\"", column),
                ));
            }
        }

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| TableError::malformed(name, e.to_string()))?;
            let row = record
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        ZERO_FILL.to_string()
                    } else {
                        cell.to_string()
                    }
                })
                .collect();
            raw_rows.push(row);
        }

        let columns: Vec<Column> = header
            .into_iter()
            .enumerate()
            .map(|(idx, column_name)| {
                let column_type = ColumnType::infer(raw_rows.iter().map(|row| row[idx].as_str()));
                Column::new(column_name, column_type)
            })
            .collect();

        let rows = raw_rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(&columns)
                    .map(|(cell, column)| {
                        column
                            .column_type
                            .parse(cell)
                            .ok_or_else(|| {
                                TableError::malformed(
                                    name,
                                    format!("value \"{}\" in column \"{}\"", cell, column.name),
                                )
                            })
                    })
                    .collect::<TableResult<Vec<Scalar>>>()
            })
            .collect::<TableResult<Vec<Vec<Scalar>>>>()?;

        Ok(Table {
            name: name.to_string(),
            columns,
            rows,
        })
    }
}

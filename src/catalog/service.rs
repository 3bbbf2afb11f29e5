//! # Table Catalog Service
//!
//! List, query, upload and delete CSV tables held in a `BlobStore`.
//! Tables are loaded per call and never cached.

use serde::Serialize;

use crate::file_storage::BlobStore;
use crate::observability::ObservationScope;
use crate::query::Query;
use crate::table::{RowRecord, Table, TableLoader};

use super::errors::{CatalogError, CatalogResult};

/// Canonical table-file suffix
pub const TABLE_SUFFIX: &str = ".csv";

/// Filename and header of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub filename: String,
    pub columns: Vec<String>,
}

/// Append the table suffix when a requested name lacks it.
pub fn resolve_filename(name: &str) -> String {
    if name.ends_with(TABLE_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, TABLE_SUFFIX)
    }
}

/// Overwrite is requested by the literal "1" or "true" in any case.
pub fn overwrite_requested(flag: Option<&str>) -> bool {
    match flag {
        Some(flag) => flag == "1" || flag.eq_ignore_ascii_case("true"),
        None => false,
    }
}

/// Table catalog over a blob store
#[derive(Debug)]
pub struct TableCatalog<B: BlobStore> {
    store: B,
}

impl<B: BlobStore> TableCatalog<B> {
    pub fn new(store: B) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    /// Every table in storage with its columns, sorted by filename.
    pub fn list(&self) -> CatalogResult<Vec<TableSummary>> {
        let mut summaries = Vec::new();

        for name in self.store.list()? {
            if !name.ends_with(TABLE_SUFFIX) {
                continue;
            }
            let table = self.load(&name)?;
            summaries.push(TableSummary {
                filename: name,
                columns: table.column_names(),
            });
        }

        summaries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(summaries)
    }

    /// Load a table by (possibly unsuffixed) name.
    pub fn load(&self, name: &str) -> CatalogResult<Table> {
        let filename = resolve_filename(name);
        if !self.store.exists(&filename)? {
            return Err(CatalogError::NotFound(filename));
        }

        let data = self.store.read(&filename)?;
        Ok(TableLoader::load(&filename, &data)?)
    }

    /// Rows of one table after applying `query`.
    pub fn get(&self, name: &str, query: &Query) -> CatalogResult<Vec<RowRecord>> {
        let table = self.load(name)?;
        let table = query.execute(table)?;
        Ok(table.into_records())
    }

    /// Rows of one table for the raw request lists
    /// (`filter_key`, `filter_value`, `sort_by`).
    ///
    /// The table is resolved before the lists are paired or parsed, so a
    /// missing table is `NotFound` whatever the lists hold.
    pub fn get_by_params(
        &self,
        name: &str,
        filter_keys: &[String],
        filter_values: &[String],
        sort_tokens: &[String],
    ) -> CatalogResult<Vec<RowRecord>> {
        let table = self.load(name)?;
        let query = Query::from_params(filter_keys, filter_values, sort_tokens)?;
        Ok(query.execute(table)?.into_records())
    }

    /// Store `content` under `filename`, returning the stored name.
    ///
    /// Content is stored verbatim and is not validated.
    pub fn upload(
        &self,
        filename: Option<&str>,
        content: &[u8],
        overwrite: bool,
    ) -> CatalogResult<String> {
        let filename = match filename {
            Some(name) if !name.is_empty() => name,
            _ => return Err(CatalogError::InvalidFilename("missing filename".to_string())),
        };

        if !filename.ends_with(TABLE_SUFFIX) {
            return Err(CatalogError::InvalidFilename("wrong file format".to_string()));
        }

        if self.store.exists(filename)? && !overwrite {
            return Err(CatalogError::Conflict(filename.to_string()));
        }

        let size = content.len().to_string();
        let scope = ObservationScope::new(
            "TABLE_UPLOAD",
            &[("table", filename), ("bytes", size.as_str())],
        );
        self.store.write(filename, content)?;
        scope.complete();

        Ok(filename.to_string())
    }

    /// Remove a table by (possibly unsuffixed) name.
    pub fn delete(&self, name: &str) -> CatalogResult<()> {
        let filename = resolve_filename(name);
        if !self.store.exists(&filename)? {
            return Err(CatalogError::NotFound(filename));
        }

        let scope = ObservationScope::new("TABLE_DELETE", &[("table", filename.as_str())]);
        self.store.delete(&filename)?;
        scope.complete();

        Ok(())
    }
}

//! Table HTTP Routes
//!
//! - `GET    /tables`         list tables and their columns
//! - `GET    /tables/:name`   rows, with `filter_key`/`filter_value`/`sort_by`
//! - `POST   /tables`         multipart upload (`file`, optional `overwrite`)
//! - `DELETE /tables/:name`   remove a table

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::{overwrite_requested, resolve_filename, TableCatalog, TableSummary};
use crate::file_storage::BlobStore;
use crate::observability::Logger;
use crate::table::RowRecord;

use super::errors::{HttpError, HttpResult};

// ==================
// Shared State
// ==================

/// Table state shared across handlers
pub struct TablesState<B: BlobStore> {
    pub catalog: TableCatalog<B>,
}

impl<B: BlobStore> TablesState<B> {
    pub fn new(store: B) -> Self {
        Self {
            catalog: TableCatalog::new(store),
        }
    }
}

type SharedState<B> = Arc<TablesState<B>>;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
}

// ==================
// Table Routes
// ==================

/// Create table routes
pub fn table_routes<B: BlobStore + 'static>(state: SharedState<B>) -> Router {
    Router::new()
        .route("/tables", get(list_tables_handler::<B>).post(upload_table_handler::<B>))
        .route(
            "/tables/:name",
            get(get_table_handler::<B>).delete(delete_table_handler::<B>),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Split repeated query parameters into the three request lists,
/// keeping their order.
fn split_params(params: Vec<(String, String)>) -> (Vec<String>, Vec<String>, Vec<String>) {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    let mut sort_by = Vec::new();

    for (name, value) in params {
        match name.as_str() {
            "filter_key" => keys.push(value),
            "filter_value" => values.push(value),
            "sort_by" => sort_by.push(value),
            _ => {}
        }
    }

    (keys, values, sort_by)
}

/// Request id and operation name for one handler call
struct RequestTrace {
    id: String,
    operation: &'static str,
}

impl RequestTrace {
    fn new(operation: &'static str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            operation,
        }
    }

    /// Log a failed `result` under this request id and hand it back
    fn finish<T>(&self, result: HttpResult<T>) -> HttpResult<T> {
        if let Err(err) = &result {
            self.log_failure(err);
        }
        result
    }

    fn log_failure(&self, err: &HttpError) {
        let status = err.status_code().as_u16().to_string();
        let detail = err.to_string();
        let fields = [
            ("request_id", self.id.as_str()),
            ("operation", self.operation),
            ("status", status.as_str()),
            ("detail", detail.as_str()),
        ];

        if err.status_code().is_server_error() {
            Logger::error("REQUEST_FAILED", &fields);
        } else {
            Logger::warn("REQUEST_FAILED", &fields);
        }
    }
}

/// Run a synchronous handler body under a fresh request id
fn traced<T>(operation: &'static str, body: impl FnOnce(&str) -> HttpResult<T>) -> HttpResult<T> {
    let trace = RequestTrace::new(operation);
    let result = body(&trace.id);
    trace.finish(result)
}

/// File part (client filename, bytes) and overwrite flag of an upload
struct UploadForm {
    file: Option<(Option<String>, Vec<u8>)>,
    overwrite: Option<String>,
}

async fn read_upload_form(multipart: &mut Multipart) -> HttpResult<UploadForm> {
    let read_error = |e: MultipartError| HttpError::BadRequest(e.to_string());
    let mut form = UploadForm {
        file: None,
        overwrite: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        let part = field.name().map(str::to_string);
        match part.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_string);
                let data = field.bytes().await.map_err(read_error)?;
                form.file = Some((file_name, data.to_vec()));
            }
            Some("overwrite") => {
                form.overwrite = Some(field.text().await.map_err(read_error)?);
            }
            _ => {}
        }
    }

    Ok(form)
}

// ==================
// Handlers
// ==================

async fn list_tables_handler<B: BlobStore + 'static>(
    State(state): State<SharedState<B>>,
) -> HttpResult<Json<Vec<TableSummary>>> {
    traced("list", |request_id| {
        let tables = state.catalog.list()?;
        let count = tables.len().to_string();
        Logger::info(
            "TABLE_LIST",
            &[("request_id", request_id), ("tables", count.as_str())],
        );
        Ok(Json(tables))
    })
}

async fn get_table_handler<B: BlobStore + 'static>(
    State(state): State<SharedState<B>>,
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> HttpResult<Json<Vec<RowRecord>>> {
    traced("get", |request_id| {
        let (keys, values, sort_by) = split_params(params);
        let rows = state.catalog.get_by_params(&name, &keys, &values, &sort_by)?;

        let filename = resolve_filename(&name);
        let count = rows.len().to_string();
        Logger::info(
            "TABLE_GET",
            &[
                ("request_id", request_id),
                ("table", filename.as_str()),
                ("rows", count.as_str()),
            ],
        );
        Ok(Json(rows))
    })
}

async fn upload_table_handler<B: BlobStore + 'static>(
    State(state): State<SharedState<B>>,
    mut multipart: Multipart,
) -> HttpResult<Json<UploadResponse>> {
    let trace = RequestTrace::new("upload");

    let result = read_upload_form(&mut multipart).await.and_then(|form| {
        let (file_name, data) = form
            .file
            .ok_or_else(|| HttpError::BadRequest("missing file".to_string()))?;

        let filename = state.catalog.upload(
            file_name.as_deref(),
            &data,
            overwrite_requested(form.overwrite.as_deref()),
        )?;

        Logger::info(
            "TABLE_UPLOADED",
            &[("request_id", trace.id.as_str()), ("table", filename.as_str())],
        );
        Ok(Json(UploadResponse { filename }))
    });

    trace.finish(result)
}

async fn delete_table_handler<B: BlobStore + 'static>(
    State(state): State<SharedState<B>>,
    Path(name): Path<String>,
) -> HttpResult<StatusCode> {
    traced("delete", |request_id| {
        state.catalog.delete(&name)?;

        let filename = resolve_filename(&name);
        Logger::info(
            "TABLE_DELETED",
            &[("request_id", request_id), ("table", filename.as_str())],
        );
        Ok(StatusCode::OK)
    })
}

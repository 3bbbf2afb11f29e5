//! HTTP route tests
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`
//! over an in-memory blob store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tabula::file_storage::{BlobStore, MemoryBackend};
use tabula::http_server::{table_routes, HttpServer, HttpServerConfig, TablesState};

// =============================================================================
// Test Utilities
// =============================================================================

const TORNADOS: &str = "yr,mo,dy\n1950,12,3\n1950,12,1\n1951,1,5\n";
const BOUNDARY: &str = "tabula-test-boundary";

fn state() -> Arc<TablesState<MemoryBackend>> {
    Arc::new(TablesState::new(MemoryBackend::with_blobs([
        ("t.csv", TORNADOS),
        ("readme.txt", "ignored"),
    ])))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(router: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

/// One multipart part: field name, optional filename, content
type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/tables")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

// =============================================================================
// GET /tables
// =============================================================================

#[tokio::test]
async fn test_list_tables() {
    let (status, body) = get_json(table_routes(state()), "/tables").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"filename": "t.csv", "columns": ["yr", "mo", "dy"]}]));
}

// =============================================================================
// GET /tables/:name
// =============================================================================

#[tokio::test]
async fn test_filter_and_sort_ascending() {
    let (status, body) = get(
        table_routes(state()),
        "/tables/t?filter_key=yr&filter_value=1950&sort_by=dy_asc",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // records keep the header's column order
    assert_eq!(
        body,
        r#"[{"yr":1950,"mo":12,"dy":1},{"yr":1950,"mo":12,"dy":3}]"#
    );
}

#[tokio::test]
async fn test_sort_without_suffix_is_descending() {
    let (status, body) = get_json(
        table_routes(state()),
        "/tables/t.csv?filter_key=yr&filter_value=1950&sort_by=dy",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{"yr": 1950, "mo": 12, "dy": 3}, {"yr": 1950, "mo": 12, "dy": 1}])
    );
}

#[tokio::test]
async fn test_multiple_filters() {
    let (status, body) = get_json(
        table_routes(state()),
        "/tables/t?filter_key=yr&filter_key=mo&filter_value=1950&filter_value=12",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["yr"], 1950);
        assert_eq!(row["mo"], 12);
    }
}

#[tokio::test]
async fn test_no_query_returns_all_rows_in_file_order() {
    let (status, body) = get_json(table_routes(state()), "/tables/t").await;

    assert_eq!(status, StatusCode::OK);
    let days: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["dy"].as_i64().unwrap())
        .collect();
    assert_eq!(days, vec![3, 1, 5]);
}

#[tokio::test]
async fn test_missing_table_is_404() {
    let (status, body) = get_json(table_routes(state()), "/tables/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_missing_table_is_404_before_query_checks() {
    for uri in [
        "/tables/missing?filter_key=yr",
        "/tables/missing?filter_value=1",
        "/tables/missing?sort_by=_asc",
        "/tables/missing?filter_key=yr&filter_value=nineteen",
    ] {
        let (status, body) = get_json(table_routes(state()), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {}", uri);
        assert_eq!(body["code"], 404, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_unknown_filter_column_is_400_naming_field() {
    let (status, body) = get_json(
        table_routes(state()),
        "/tables/t?filter_key=zz&filter_value=1",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["error"].as_str().unwrap();
    assert!(detail.contains("zz"), "detail: {}", detail);
    assert!(detail.contains("t.csv"), "detail: {}", detail);
}

#[tokio::test]
async fn test_unknown_sort_column_is_400() {
    let (status, body) = get_json(table_routes(state()), "/tables/t?sort_by=zz_asc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("zz"));
}

#[tokio::test]
async fn test_filter_length_mismatch_is_400() {
    for uri in [
        "/tables/t?filter_key=yr&filter_key=mo&filter_value=1950",
        "/tables/t?filter_key=yr",
        "/tables/t?filter_value=1",
    ] {
        let (status, _) = get(table_routes(state()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_unparseable_numeric_literal_is_400() {
    let (status, body) = get_json(
        table_routes(state()),
        "/tables/t?filter_key=yr&filter_value=nineteen",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("nineteen"));
}

#[tokio::test]
async fn test_malformed_table_is_500() {
    let state = Arc::new(TablesState::new(MemoryBackend::with_blobs([(
        "bad.csv",
        "a,b\n1,2\n3\n",
    )])));

    let (status, _) = get(table_routes(state), "/tables/bad").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// POST /tables
// =============================================================================

#[tokio::test]
async fn test_upload_new_table() {
    let state = state();
    let request = upload_request(&[("file", Some("new.csv"), &b"a,b\n1,2\n"[..])]);

    let (status, body) = send(table_routes(state.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"filename": "new.csv"}));
    assert_eq!(state.catalog.store().read("new.csv").unwrap(), b"a,b\n1,2\n");
}

#[tokio::test]
async fn test_upload_conflict_then_overwrite() {
    let state = state();

    let request = upload_request(&[("file", Some("t.csv"), &b"x\n1\n"[..])]);
    let (status, _) = send(table_routes(state.clone()), request).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(state.catalog.store().read("t.csv").unwrap(), TORNADOS.as_bytes());

    let request = upload_request(&[
        ("file", Some("t.csv"), &b"x\n1\n"[..]),
        ("overwrite", None, &b"true"[..]),
    ]);
    let (status, body) = send(table_routes(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"filename": "t.csv"}));
    assert_eq!(state.catalog.store().read("t.csv").unwrap(), b"x\n1\n");
}

#[tokio::test]
async fn test_upload_overwrite_flag_other_values_conflict() {
    let request = upload_request(&[
        ("overwrite", None, &b"yes"[..]),
        ("file", Some("t.csv"), &b"x\n1\n"[..]),
    ]);
    let (status, _) = send(table_routes(state()), request).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let request = upload_request(&[
        ("overwrite", None, &b"1"[..]),
        ("file", Some("t.csv"), &b"x\n1\n"[..]),
    ]);
    let (status, _) = send(table_routes(state()), request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_wrong_format_is_400() {
    let request = upload_request(&[("file", Some("main.py"), &b"print('hi')\n"[..])]);
    let (status, body) = send(table_routes(state()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("wrong file format"));
}

#[tokio::test]
async fn test_upload_missing_filename_is_400() {
    let request = upload_request(&[("file", None, TORNADOS.as_bytes())]);
    let (status, body) = send(table_routes(state()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("missing filename"));
}

#[tokio::test]
async fn test_upload_without_file_part_is_400() {
    let request = upload_request(&[("overwrite", None, &b"1"[..])]);
    let (status, _) = send(table_routes(state()), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// DELETE /tables/:name
// =============================================================================

#[tokio::test]
async fn test_upload_truncated_body_is_400() {
    let state = state();
    let body = format!(
        "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"cut.csv\"\r\n\r\na,b\n1,",
        BOUNDARY
    );
    let request = Request::builder()
        .method("POST")
        .uri("/tables")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(table_routes(state.clone()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["code"], 400);
    assert!(!state.catalog.store().exists("cut.csv").unwrap());
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let state = state();

    let request = Request::builder()
        .method("DELETE")
        .uri("/tables/t.csv")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(table_routes(state.clone()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert!(!state.catalog.store().exists("t.csv").unwrap());

    let request = Request::builder()
        .method("DELETE")
        .uri("/tables/t")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(table_routes(state), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Full server router
// =============================================================================

#[tokio::test]
async fn test_server_router_serves_health_and_tables() {
    let router = HttpServer::with_backend(
        HttpServerConfig::default(),
        MemoryBackend::with_blobs([("t.csv", TORNADOS)]),
    )
    .router();

    let (status, body) = get_json(router.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get_json(router, "/tables").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["filename"], "t.csv");
}

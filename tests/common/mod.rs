//! Shared helpers for integration tests
//!
//! Builds a temporary SQLite dataset from the sample fixture and drives the
//! full router through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use f1_query_backend::{api::build_router, db::SqliteStore, state::AppState};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const SAMPLE_DATASET: &str = include_str!("../fixtures/f1_sample.sql");

/// A read-only app over a temporary dataset; the directory lives as long as this
pub struct TestApp {
    pub router: Router,
    pub store: SqliteStore,
    _dir: TempDir,
}

/// Write `sql` into a fresh database file and return its directory and path
pub async fn create_dataset(sql: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("f1.db");

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create dataset");

    if !sql.is_empty() {
        sqlx::raw_sql(sql)
            .execute(&pool)
            .await
            .expect("Failed to load dataset");
    }
    pool.close().await;

    (dir, path.to_string_lossy().into_owned())
}

/// App over the sample dataset
pub async fn sample_app() -> TestApp {
    app_with_dataset(SAMPLE_DATASET).await
}

/// App over a dataset built from `sql`
pub async fn app_with_dataset(sql: &str) -> TestApp {
    let (dir, path) = create_dataset(sql).await;
    let store = SqliteStore::open_read_only(&path, 4)
        .await
        .expect("Failed to open dataset read-only");

    let state = Arc::new(AppState::new(Arc::new(store.clone())));
    TestApp {
        router: build_router(state),
        store,
        _dir: dir,
    }
}

/// Issue a GET and return the status and the parsed JSON body
pub async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get_bytes(app, uri).await;
    let body = serde_json::from_slice(&bytes).expect("Response body is not JSON");
    (status, body)
}

/// Issue a GET and return the status and the raw body
pub async fn get_bytes(app: &TestApp, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Extract an integer field from every element of an array body
pub fn column(body: &Value, field: &str) -> Vec<i64> {
    body.as_array()
        .expect("Expected a JSON array")
        .iter()
        .map(|row| row[field].as_i64().expect("Expected an integer field"))
        .collect()
}

//! API handlers
//!
//! Every read endpoint goes through [`dispatch`]; the remaining handlers serve
//! the index, health check and unmatched routes.

use crate::error::AppError;
use crate::query::{Operation, OPERATIONS};
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    response::Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Index response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    /// Human-readable message
    pub message: String,
    /// Status indicator
    pub status: String,
    /// Service version
    pub version: String,
    /// Available read endpoints
    pub endpoints: Vec<EndpointInfo>,
}

/// One entry of the index endpoint list
#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    /// Route pattern
    pub path: String,
    /// What the endpoint returns
    pub description: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health indicator
    pub status: String,
    /// Service version
    pub version: String,
    /// Seconds since startup
    pub uptime_secs: u64,
    /// Time of the check (RFC 3339)
    pub timestamp: String,
}

/// Run `op` with whatever path parameters the matched route captured
pub async fn dispatch(
    op: &'static Operation,
    State(state): State<Arc<AppState>>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let params = path_params(params)?;
    let body = state.queries.run(op, &params).await?;
    Ok(Json(body))
}

/// Unwrap extracted path captures; undecodable segments are a client error
fn path_params(
    params: Result<Path<HashMap<String, String>>, PathRejection>,
) -> Result<HashMap<String, String>, AppError> {
    match params {
        Ok(Path(params)) => Ok(params),
        Err(PathRejection::MissingPathParams(_)) => Ok(HashMap::new()),
        Err(rejection) => Err(AppError::InvalidParameter(rejection.body_text())),
    }
}

/// GET / - Service status and endpoint list
pub async fn index() -> Json<IndexResponse> {
    let endpoints = OPERATIONS
        .iter()
        .flat_map(|op| {
            op.routes.iter().map(|route| EndpointInfo {
                path: route.to_string(),
                description: op.description.to_string(),
            })
        })
        .collect();

    Json(IndexResponse {
        message: "F1 query API".to_string(),
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints,
    })
}

/// GET /health - Verify the dataset is reachable
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, AppError> {
    state.queries.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Fallback for unmatched paths
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

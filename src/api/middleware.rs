//! HTTP middleware

use crate::query::OPERATIONS;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - tags each request with an ID, the matched route
/// and the dataset operation it resolves to
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    let operation = operation_for_route(&route).unwrap_or("-");
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
        operation = operation,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        route = %route,
        operation = operation,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Name of the operation registered under `route`, if any
pub fn operation_for_route(route: &str) -> Option<&'static str> {
    OPERATIONS
        .iter()
        .find(|op| op.routes.iter().any(|r| *r == route))
        .map(|op| op.name)
}

//! API module
//!
//! Builds the HTTP router from the operation table and holds the request
//! handlers and middleware.

pub mod handlers;
pub mod middleware;

use crate::query::OPERATIONS;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the application router
///
/// Every route of every operation is registered against the generic
/// [`handlers::dispatch`] handler.
pub fn build_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        // Health check and index
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check));

    for op in OPERATIONS {
        for route in op.routes {
            router = router.route(
                route,
                get(
                    move |state: State<Arc<AppState>>,
                          params: Result<Path<HashMap<String, String>>, PathRejection>| {
                        handlers::dispatch(op, state, params)
                    },
                ),
            );
        }
    }

    router
        .fallback(handlers::route_not_found)
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

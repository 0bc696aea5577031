//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::db::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Every failure a request can hit is classified into one of these variants,
/// and each variant maps to exactly one HTTP status code.
#[derive(Error, Debug)]
pub enum AppError {
    /// A path parameter failed its type or range check; no query was run
    #[error("{0}")]
    InvalidParameter(String),

    /// The query ran but matched nothing
    #[error("{0}")]
    NotFound(String),

    /// No route matches the request path
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    /// The data store reported a failure; its message is passed through
    #[error("{0}")]
    DataStore(#[from] StoreError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DataStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

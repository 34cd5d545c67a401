//! HTTP error mapping
//!
//! Storage failures are logged and surfaced as a generic 500; import
//! failures carry their detail; malformed requests get a 400.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rollcall_common::Error;
use serde_json::json;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    /// Storage failure; detail is logged, not returned to the client
    Storage(Error),
    /// Roster stream could not be read or parsed
    Import(String),
    /// Malformed request
    BadRequest(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::Import(msg) => ApiError::Import(msg),
            other => ApiError::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Storage(e) => {
                error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            ApiError::Import(msg) => {
                error!("Roster import failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Import failed: {}", msg),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

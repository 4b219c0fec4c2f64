//! Structured denial responses
//!
//! Builds the 401 body returned when the access policy rejects a request.
//! Denial happens entirely here, before any business handler runs.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Body shape of an authorization denial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenialBody {
    /// Always 401
    pub status: u16,
    /// Always "Unauthorized"
    pub error: String,
    /// Why the request was denied
    pub message: String,
    /// The path that was requested
    pub path: String,
}

/// Build the structured 401 response for a denied request
pub fn unauthorized_response(message: &str, path: &str) -> Response {
    tracing::error!(path, message, "unauthorized error");

    let body = DenialBody {
        status: StatusCode::UNAUTHORIZED.as_u16(),
        error: "Unauthorized".to_string(),
        message: message.to_string(),
        path: path.to_string(),
    };

    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

//! HTTP handlers
//!
//! The signin handler is the authentication boundary: every
//! authentication failure from the verification step is converted into
//! the generic bad-credentials response here and never propagates. The
//! remaining handlers are thin stubs standing in for the business layer;
//! by the time they run, the access-control stage has already decided.

use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Signin request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username to authenticate
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// `POST /api/auth/public/signin`
///
/// Returns `200 {username, roles, token}` on success. Failure keeps the
/// upstream wire contract: HTTP 404 with `{"message": "Bad credentials",
/// "status": false}`, deliberately identical for unknown users and wrong
/// passwords.
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    match state
        .authenticator
        .authenticate(&request.username, &request.password)
    {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) if err.is_authentication_failure() => {
            tracing::debug!(username = %request.username, error = %err, "signin rejected");
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Bad credentials", "status": false })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "signin failed unexpectedly");
            internal_error()
        }
    }
}

/// `GET /api/csrf-token`
///
/// Public endpoint handing out a per-request CSRF token, shaped like the
/// upstream framework's response.
pub async fn csrf_token() -> Response {
    let body = json!({
        "token": uuid::Uuid::new_v4().to_string(),
        "headerName": "X-XSRF-TOKEN",
        "parameterName": "_csrf",
    });
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /api/admin/getusers` - business stub behind the ADMIN-only prefix
pub async fn admin_get_users() -> Response {
    (StatusCode::OK, Json(json!({ "users": [] }))).into_response()
}

/// `GET /api/notes` - business stub behind the authenticated catch-all
pub async fn list_notes() -> Response {
    (StatusCode::OK, Json(json!({ "notes": [] }))).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Internal server error", "status": false })),
    )
        .into_response()
}

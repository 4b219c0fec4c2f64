//! Router wiring
//!
//! Both middleware stages wrap every route. axum runs the outermost layer
//! first, so the identity layer is added last: identity attachment always
//! precedes the access decision.

use crate::auth::middleware::{access_control_middleware, identity_middleware};
use crate::server::handlers;
use crate::server::state::AppState;
use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

/// Build the application router over the shared state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/public/signin", post(handlers::signin))
        .route("/api/csrf-token", get(handlers::csrf_token))
        .route("/api/admin/getusers", get(handlers::admin_get_users))
        .route("/api/notes", get(handlers::list_notes))
        .layer(from_fn_with_state(
            state.clone(),
            access_control_middleware,
        ))
        .layer(from_fn_with_state(state.clone(), identity_middleware))
        .with_state(state)
}

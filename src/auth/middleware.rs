//! Per-request identity attachment and access control
//!
//! Two explicit axum middleware stages. The identity stage runs for every
//! request, public routes included, and never denies: any token failure is
//! logged and the request proceeds unauthenticated. The access-control
//! stage is the only place a request is denied. Keeping the stages apart
//! means a token parse error can never accidentally grant access, and a
//! stale or garbage token never blocks a public route.

use crate::auth::policy::AccessDecision;
use crate::auth::responder::unauthorized_response;
use crate::domain::error::Result;
use crate::domain::principal::Principal;
use crate::server::state::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Resolved identity attached to the request for downstream stages
#[derive(Clone)]
pub struct CurrentUser(pub Arc<Principal>);

/// Best-effort identity attachment
///
/// Extracts a `Bearer` token from the Authorization header, verifies it,
/// resolves the subject to a principal and attaches it to the request
/// extensions. Every failure is swallowed here; authorization is solely
/// the access-control stage's responsibility.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    tracing::debug!(path = %req.uri().path(), "authentication filter called");

    if let Some(token) = bearer_token(req.headers()) {
        match resolve_identity(&state, token) {
            Ok(principal) => {
                tracing::debug!(
                    username = %principal.username,
                    roles = ?principal.role_names(),
                    "identity attached from token"
                );
                req.extensions_mut().insert(CurrentUser(Arc::new(principal)));
            }
            Err(err) if err.is_token_error() => {
                // Fail open to unauthenticated; the policy stage decides.
                tracing::error!(error = %err, "invalid bearer token");
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot set user authentication");
            }
        }
    }

    next.run(req).await
}

/// Fail-closed access decision
///
/// Evaluates the ordered rule list against the request path and the
/// identity attached by [`identity_middleware`]. A deny is answered with
/// the structured 401 body before any business handler runs.
pub async fn access_control_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    let identity = req.extensions().get::<CurrentUser>().cloned();

    match state
        .policy
        .evaluate(&path, identity.as_ref().map(|c| c.0.as_ref()))
    {
        AccessDecision::Allow => next.run(req).await,
        AccessDecision::Deny { reason } => unauthorized_response(&reason, &path),
    }
}

/// Extract the token from a `Bearer `-prefixed Authorization header
///
/// The prefix check is case-sensitive and the token starts at offset 7.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn resolve_identity(state: &AppState, token: &str) -> Result<Principal> {
    state.token_codec.verify(token)?;
    let subject = state.token_codec.subject_of(token)?;
    state.principal_provider.load_by_username(&subject)
}

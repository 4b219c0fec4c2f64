//! Shared application state
//!
//! Everything here is read-only after startup; handlers and middleware
//! share it through cheap `Arc` clones, so no locking is needed on the
//! request path.

use crate::auth::authenticator::RequestAuthenticator;
use crate::auth::policy::AccessControlPolicy;
use crate::auth::provider::PrincipalProvider;
use crate::auth::token::TokenCodec;
use std::sync::Arc;

/// State injected into the router and middleware
#[derive(Clone)]
pub struct AppState {
    /// Token issuance and verification
    pub token_codec: Arc<TokenCodec>,
    /// Username to principal resolution
    pub principal_provider: Arc<PrincipalProvider>,
    /// Login orchestration
    pub authenticator: Arc<RequestAuthenticator>,
    /// Ordered access rules
    pub policy: Arc<AccessControlPolicy>,
}

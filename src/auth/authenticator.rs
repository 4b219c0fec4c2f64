//! Login orchestration
//!
//! Verifies credentials against the account store and issues a token on
//! success. The failure kinds stay distinct here so callers can log them;
//! the signin handler collapses all of them into one generic
//! bad-credentials response so the body never distinguishes "unknown
//! user" from "wrong password".

use crate::auth::password;
use crate::auth::provider::PrincipalProvider;
use crate::auth::token::TokenCodec;
use crate::domain::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Successful login result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    /// Authenticated username
    pub username: String,
    /// Role names held by the principal, wire form
    pub roles: Vec<String>,
    /// Freshly issued serialized token
    pub token: String,
}

/// Orchestrates the login flow
pub struct RequestAuthenticator {
    provider: Arc<PrincipalProvider>,
    codec: Arc<TokenCodec>,
}

impl RequestAuthenticator {
    /// Create an authenticator over a principal provider and token codec
    pub fn new(provider: Arc<PrincipalProvider>, codec: Arc<TokenCodec>) -> Self {
        Self { provider, codec }
    }

    /// Authenticate a username/password pair and issue a token
    pub fn authenticate(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let principal = self.provider.load_by_username(username)?;

        if !password::verify_password(password, &principal.password_hash)? {
            tracing::debug!(username, "password verification failed");
            return Err(Error::CredentialMismatch);
        }

        let token = self.codec.issue(&principal.username)?;
        tracing::debug!(username, roles = ?principal.role_names(), "login succeeded");

        Ok(LoginOutcome {
            username: principal.username.clone(),
            roles: principal.role_names(),
            token,
        })
    }
}

//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the notegate authentication pipeline
///
/// Token and principal-lookup failures during the per-request middleware
/// pass are recovered locally (logged, request proceeds unauthenticated).
/// Login failures are converted at the handler boundary. Only
/// `AuthorizationDenied` is surfaced to clients as a structured body.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid token: {0}")]
    TokenMalformed(String),

    #[error("token is expired")]
    TokenExpired,

    #[error("token is unsupported: {0}")]
    TokenUnsupported(String),

    #[error("token signature does not verify")]
    TokenBadSignature,

    #[error("token claims string is empty")]
    TokenEmptyClaims,

    #[error("user not found with username: {username}")]
    PrincipalNotFound { username: String },

    #[error("bad credentials")]
    CredentialMismatch,

    #[error("account is not usable: {username}")]
    AccountUnusable { username: String },

    #[error("access denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("password hashing error: {message}")]
    Hash { message: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a password hashing error
    pub fn hash<S: Into<String>>(message: S) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Create a principal-not-found error
    pub fn principal_not_found<S: Into<String>>(username: S) -> Self {
        Self::PrincipalNotFound {
            username: username.into(),
        }
    }

    /// Whether this is one of the token validation failure kinds
    ///
    /// All of them are non-fatal to the request pipeline: they are logged
    /// and treated uniformly as "no identity attached".
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::TokenMalformed(_)
                | Self::TokenExpired
                | Self::TokenUnsupported(_)
                | Self::TokenBadSignature
                | Self::TokenEmptyClaims
        )
    }

    /// Whether this failure maps to the generic login failure response
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::CredentialMismatch | Self::PrincipalNotFound { .. } | Self::AccountUnusable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_are_classified() {
        assert!(Error::TokenExpired.is_token_error());
        assert!(Error::TokenBadSignature.is_token_error());
        assert!(Error::TokenMalformed("junk".into()).is_token_error());
        assert!(!Error::CredentialMismatch.is_token_error());
        assert!(!Error::principal_not_found("ghost").is_token_error());
    }

    #[test]
    fn login_failures_are_classified() {
        assert!(Error::CredentialMismatch.is_authentication_failure());
        assert!(Error::principal_not_found("ghost").is_authentication_failure());
        assert!(!Error::TokenExpired.is_authentication_failure());
    }
}

//! Signed, time-bounded identity tokens
//!
//! HS256 JWTs over a base64-decoded symmetric secret. Tokens are
//! stateless: nothing is persisted server-side and there is no revocation
//! before natural expiry. That is the trade-off for horizontal scaling
//! without shared session state.
//!
//! The clock is injected so expiry behavior is testable with arbitrary
//! times; expiry is checked here against that clock rather than inside the
//! JWT library.

use crate::domain::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for token issuance and expiry checks
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Claims carried by an issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (username)
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: u64,
    /// Expiry, seconds since the Unix epoch
    pub exp: u64,
}

/// Issues and verifies signed identity tokens
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_ms: u64,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a codec from a base64-encoded symmetric secret and a fixed
    /// token lifetime in milliseconds
    pub fn new(base64_secret: &str, expiration_ms: u64) -> Result<Self> {
        Self::with_clock(base64_secret, expiration_ms, Arc::new(SystemClock))
    }

    /// Create a codec with an explicit clock
    pub fn with_clock(
        base64_secret: &str,
        expiration_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let secret = BASE64
            .decode(base64_secret)
            .map_err(|e| Error::config(format!("jwt_secret is not valid base64: {e}")))?;
        if secret.is_empty() {
            return Err(Error::config("jwt_secret must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&secret),
            decoding_key: DecodingKey::from_secret(&secret),
            expiration_ms,
            clock,
        })
    }

    /// Issue a signed token for the given subject
    ///
    /// `exp` is `iat` plus the configured lifetime; both are carried in the
    /// claims at second granularity as JWT requires.
    pub fn issue(&self, subject: &str) -> Result<String> {
        let now_ms = self.clock.now_ms();
        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now_ms / 1000,
            exp: (now_ms + self.expiration_ms) / 1000,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| Error::config(format!("token signing failed: {e}")))
    }

    /// Parse a serialized token, checking structure, signature and expiry
    ///
    /// A token is valid iff its signature verifies against the current
    /// secret and `now < exp`. Every failure kind is non-fatal to the
    /// request pipeline; callers log and proceed unauthenticated.
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        if token.trim().is_empty() {
            return Err(Error::TokenEmptyClaims);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "exp"]);
        // Expiry is checked below against the injected clock.
        validation.validate_exp = false;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(map_jwt_error)?;

        if self.clock.now_ms() >= data.claims.exp * 1000 {
            return Err(Error::TokenExpired);
        }

        Ok(data.claims)
    }

    /// Extract the subject from an already-verified token without
    /// re-checking expiry
    pub fn subject_of(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub"]);
        validation.validate_exp = false;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(map_jwt_error)?;
        Ok(data.claims.sub)
    }
}

/// Map the JWT library's failure kinds onto the pipeline taxonomy
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> Error {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        ErrorKind::InvalidSignature => Error::TokenBadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            Error::TokenUnsupported(err.to_string())
        }
        ErrorKind::MissingRequiredClaim(_) => Error::TokenEmptyClaims,
        _ => Error::TokenMalformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed, advanceable clock for expiry tests
    struct ManualClock(AtomicU64);

    impl ManualClock {
        fn at(ms: u64) -> Arc<Self> {
            Arc::new(Self(AtomicU64::new(ms)))
        }

        fn set(&self, ms: u64) {
            self.0.store(ms, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    const START_MS: u64 = 1_700_000_000_000;
    const EXPIRATION_MS: u64 = 60_000;

    fn secret() -> String {
        BASE64.encode(b"notegate-test-secret-key-0123456789abcdef")
    }

    fn codec_at(clock: Arc<ManualClock>) -> TokenCodec {
        TokenCodec::with_clock(&secret(), EXPIRATION_MS, clock).expect("codec should build")
    }

    #[test]
    fn issue_then_verify_round_trips_subject() {
        let codec = codec_at(ManualClock::at(START_MS));
        let token = codec.issue("user1").expect("issue should succeed");

        let claims = codec.verify(&token).expect("fresh token should verify");
        assert_eq!(claims.sub, "user1");
        assert_eq!(claims.exp, claims.iat + EXPIRATION_MS / 1000);
        assert_eq!(codec.subject_of(&token).expect("subject"), "user1");
    }

    #[test]
    fn verification_is_idempotent() {
        let codec = codec_at(ManualClock::at(START_MS));
        let token = codec.issue("user1").expect("issue should succeed");

        assert!(codec.verify(&token).is_ok());
        assert!(codec.verify(&token).is_ok());
    }

    #[test]
    fn token_expires_exactly_at_the_bound() {
        let clock = ManualClock::at(START_MS);
        let codec = codec_at(clock.clone());
        let token = codec.issue("user1").expect("issue should succeed");

        clock.set(START_MS + EXPIRATION_MS - 1);
        assert!(codec.verify(&token).is_ok());

        clock.set(START_MS + EXPIRATION_MS);
        assert!(matches!(codec.verify(&token), Err(Error::TokenExpired)));

        // subject extraction does not re-check expiry
        assert_eq!(codec.subject_of(&token).expect("subject"), "user1");
    }

    #[test]
    fn wrong_secret_is_a_bad_signature() {
        let codec = codec_at(ManualClock::at(START_MS));
        let token = codec.issue("user1").expect("issue should succeed");

        let other_secret = BASE64.encode(b"a-completely-different-secret-value-here");
        let other =
            TokenCodec::with_clock(&other_secret, EXPIRATION_MS, ManualClock::at(START_MS))
                .expect("codec should build");
        assert!(matches!(
            other.verify(&token),
            Err(Error::TokenBadSignature)
        ));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let codec = codec_at(ManualClock::at(START_MS));
        assert!(matches!(
            codec.verify("not-a-real-token"),
            Err(Error::TokenMalformed(_))
        ));
    }

    #[test]
    fn empty_token_has_empty_claims() {
        let codec = codec_at(ManualClock::at(START_MS));
        assert!(matches!(codec.verify(""), Err(Error::TokenEmptyClaims)));
        assert!(matches!(codec.verify("   "), Err(Error::TokenEmptyClaims)));
    }

    #[test]
    fn foreign_algorithm_is_unsupported() {
        let codec = codec_at(ManualClock::at(START_MS));
        let claims = TokenClaims {
            sub: "user1".to_string(),
            iat: START_MS / 1000,
            exp: (START_MS + EXPIRATION_MS) / 1000,
        };
        let secret_bytes = BASE64.decode(secret()).expect("test secret decodes");
        let hs384 = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(&secret_bytes),
        )
        .expect("encode should succeed");

        assert!(matches!(
            codec.verify(&hs384),
            Err(Error::TokenUnsupported(_))
        ));
    }

    #[test]
    fn secret_must_be_base64() {
        assert!(matches!(
            TokenCodec::new("not base64 !!!", EXPIRATION_MS),
            Err(Error::Config { .. })
        ));
    }
}

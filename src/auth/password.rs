//! Password hashing with bcrypt
//!
//! bcrypt is salted and deliberately slow, which is what makes stored
//! hashes resistant to offline brute force. Hashes are never reversed,
//! only re-computed against a candidate password.

use crate::domain::error::{Error, Result};

/// bcrypt work factor
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password into a salted bcrypt digest
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| Error::hash(format!("password hashing failed: {e}")))
}

/// Verify a candidate password against a stored bcrypt digest
///
/// An empty stored hash never matches; it indicates an account that was
/// provisioned without credentials.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    if hash.is_empty() {
        return Ok(false);
    }

    bcrypt::verify(password, hash)
        .map_err(|e| Error::hash(format!("password verification failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("password1").expect("hash should succeed");

        assert!(verify_password("password1", &hash).expect("verify should succeed"));
        assert!(!verify_password("password2", &hash).expect("verify should succeed"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("password1").expect("hash should succeed");
        let b = hash_password("password1").expect("hash should succeed");
        assert_ne!(a, b);
    }

    #[test]
    fn empty_hash_never_matches() {
        assert!(!verify_password("anything", "").expect("empty hash should be handled"));
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}

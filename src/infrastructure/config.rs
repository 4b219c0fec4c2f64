//! Application configuration
//!
//! Loaded through figment from an optional TOML file with `NOTEGATE_`
//! environment overrides. The JWT secret and token lifetime are required
//! and have no defaults; startup fails fast when they are missing or the
//! secret is not valid base64.

use crate::domain::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_seed_users() -> bool {
    true
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Base64-encoded symmetric signing secret. Required.
    #[validate(length(min = 1))]
    pub jwt_secret: String,
    /// Token lifetime in milliseconds. Required.
    #[validate(range(min = 1))]
    pub jwt_expiration_ms: u64,
    /// Listen address for the HTTP server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Derive account status flags from the stored record instead of the
    /// upstream-compatible permissive behavior
    #[serde(default)]
    pub enforce_account_flags: bool,
    /// Seed the default accounts into the in-memory store at startup
    #[serde(default = "default_seed_users")]
    pub seed_users: bool,
}

impl AppConfig {
    /// Load configuration from an optional TOML file plus environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        Self::from_figment(figment.merge(Env::prefixed("NOTEGATE_")))
    }

    /// Extract and validate configuration from a prepared figment
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| Error::config(e.to_string()))?;

        config
            .validate()
            .map_err(|e| Error::config(e.to_string()))?;

        BASE64
            .decode(&config.jwt_secret)
            .map_err(|e| Error::config(format!("jwt_secret is not valid base64: {e}")))?;

        Ok(config)
    }
}

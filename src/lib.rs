//! notegate - stateless JWT authentication and role-based authorization
//!
//! Authenticates HTTP requests with a signed, time-bounded JWT and enforces
//! an ordered URL-pattern access policy. The pipeline is split into two
//! explicit stages:
//!
//! - identity attachment: best-effort, never denies a request by itself
//! - access control: the only place a request is denied
//!
//! Tokens are stateless (HMAC-signed, no server-side session store), so the
//! service scales horizontally without shared session state. The trade-off
//! is that a token cannot be revoked before its natural expiry.
//!
//! Accounts and roles live behind the [`auth::provider::AccountStore`]
//! boundary; this crate only reads them.

pub mod auth;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod server;

pub use domain::error::{Error, Result};

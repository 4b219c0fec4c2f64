//! Authentication and authorization pipeline
//!
//! Module structure:
//!
//! - `password` - one-way password hashing (bcrypt)
//! - `token` - signed, time-bounded identity tokens (JWT/HS256)
//! - `provider` - username to principal resolution over the account store
//! - `authenticator` - login orchestration
//! - `policy` - ordered URL-pattern access rules
//! - `middleware` - per-request identity attachment and access control
//! - `responder` - structured 401 denial bodies
//!
//! Identity attachment is fail-open (a garbage token never blocks a
//! request by itself); access control is fail-closed and is the only stage
//! that denies. Keeping the two stages separate means a parse error can
//! never be mistaken for a granted identity.

pub mod authenticator;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod provider;
pub mod responder;
pub mod token;

pub use authenticator::{LoginOutcome, RequestAuthenticator};
pub use middleware::{CurrentUser, access_control_middleware, identity_middleware};
pub use policy::{AccessControlPolicy, AccessDecision, AccessRule, Requirement};
pub use provider::{AccountStore, InMemoryAccountStore, PrincipalProvider};
pub use responder::{DenialBody, unauthorized_response};
pub use token::{Clock, SystemClock, TokenClaims, TokenCodec};

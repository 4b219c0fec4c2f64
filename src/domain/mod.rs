//! Domain types shared across the authentication pipeline

pub mod error;
pub mod principal;

pub use error::{Error, Result};
pub use principal::{AccountRecord, Principal, RoleName, RoleRecord};

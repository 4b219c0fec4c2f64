//! Startup seeding of default roles and accounts
//!
//! Mirrors the upstream system's bootstrap: ensures both roles exist and
//! creates a `user1`/`admin` pair when absent. Note `user1` is seeded with
//! a locked account; whether that matters depends on the
//! `enforce_account_flags` setting.

use crate::auth::password::hash_password;
use crate::auth::provider::{AccountStore, InMemoryAccountStore};
use crate::domain::error::Result;
use crate::domain::principal::{AccountRecord, RoleName};
use chrono::{Months, Utc};

/// Seed the default accounts into the store if they are not present
pub fn seed_default_accounts(store: &InMemoryAccountStore) -> Result<()> {
    store.ensure_role(RoleName::User);
    store.ensure_role(RoleName::Admin);

    let expiry = Utc::now()
        .date_naive()
        .checked_add_months(Months::new(12));

    if !store.exists_by_username("user1") {
        store.save_account(AccountRecord {
            id: 1,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password_hash: hash_password("password1")?,
            role: RoleName::User,
            account_non_locked: false,
            account_non_expired: true,
            credentials_non_expired: true,
            enabled: true,
            credentials_expiry_date: expiry,
            account_expiry_date: expiry,
            two_factor_enabled: false,
            sign_up_method: Some("email".to_string()),
        });
        tracing::info!("seeded default account user1");
    }

    if !store.exists_by_username("admin") {
        store.save_account(AccountRecord {
            id: 2,
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password("adminPass")?,
            role: RoleName::Admin,
            account_non_locked: true,
            account_non_expired: true,
            credentials_non_expired: true,
            enabled: true,
            credentials_expiry_date: expiry,
            account_expiry_date: expiry,
            two_factor_enabled: false,
            sign_up_method: Some("email".to_string()),
        });
        tracing::info!("seeded default account admin");
    }

    Ok(())
}

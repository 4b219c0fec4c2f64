//! Principal resolution over the external account store
//!
//! The account store owns accounts and roles; this module only reads it.
//! `InMemoryAccountStore` backs the binary and the tests. A production
//! deployment would put a database behind the same trait; note that no
//! timeout wraps the lookup, the host transport owns request deadlines.

use crate::domain::error::{Error, Result};
use crate::domain::principal::{AccountRecord, Principal, RoleName, RoleRecord};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Read interface onto the external account store
pub trait AccountStore: Send + Sync {
    /// Look up an account row by username
    fn find_by_username(&self, username: &str) -> Option<AccountRecord>;

    /// Whether an account with this username exists
    fn exists_by_username(&self, username: &str) -> bool;

    /// Look up role reference data by name
    fn find_role_by_name(&self, name: RoleName) -> Option<RoleRecord>;
}

/// In-memory account store keyed by username
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
    roles: RwLock<HashMap<RoleName, RoleRecord>>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account row
    pub fn save_account(&self, record: AccountRecord) {
        self.accounts
            .write()
            .expect("account store lock poisoned")
            .insert(record.username.clone(), record);
    }

    /// Ensure a role row exists, returning it
    pub fn ensure_role(&self, name: RoleName) -> RoleRecord {
        let mut roles = self.roles.write().expect("role store lock poisoned");
        let next_id = roles.len() as i64 + 1;
        roles
            .entry(name)
            .or_insert_with(|| RoleRecord { id: next_id, name })
            .clone()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_username(&self, username: &str) -> Option<AccountRecord> {
        self.accounts
            .read()
            .expect("account store lock poisoned")
            .get(username)
            .cloned()
    }

    fn exists_by_username(&self, username: &str) -> bool {
        self.accounts
            .read()
            .expect("account store lock poisoned")
            .contains_key(username)
    }

    fn find_role_by_name(&self, name: RoleName) -> Option<RoleRecord> {
        self.roles
            .read()
            .expect("role store lock poisoned")
            .get(&name)
            .cloned()
    }
}

/// Resolves a username to a full principal
pub struct PrincipalProvider {
    store: Arc<dyn AccountStore>,
    enforce_account_flags: bool,
}

impl PrincipalProvider {
    /// Create a provider over an account store
    ///
    /// `enforce_account_flags` selects whether the account status flags
    /// derive from the stored record (see [`Principal::from_record`]); the
    /// default configuration keeps the upstream-compatible permissive
    /// behavior.
    pub fn new(store: Arc<dyn AccountStore>, enforce_account_flags: bool) -> Self {
        Self {
            store,
            enforce_account_flags,
        }
    }

    /// Load a principal by username
    ///
    /// Fails with [`Error::PrincipalNotFound`] when no account matches.
    /// Callers in the middleware pass log the distinct failure and proceed
    /// unauthenticated; the login path converts it into the generic
    /// bad-credentials response.
    pub fn load_by_username(&self, username: &str) -> Result<Principal> {
        let record = self
            .store
            .find_by_username(username)
            .ok_or_else(|| Error::principal_not_found(username))?;

        let principal = Principal::from_record(
            &record,
            self.enforce_account_flags,
            Utc::now().date_naive(),
        );

        if self.enforce_account_flags && !principal.is_usable() {
            return Err(Error::AccountUnusable {
                username: username.to_string(),
            });
        }

        Ok(principal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;

    fn store_with_user(account_non_locked: bool) -> Arc<InMemoryAccountStore> {
        let store = Arc::new(InMemoryAccountStore::new());
        store.ensure_role(RoleName::User);
        store.save_account(AccountRecord {
            id: 1,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password_hash: hash_password("password1").expect("hash should succeed"),
            role: RoleName::User,
            account_non_locked,
            account_non_expired: true,
            credentials_non_expired: true,
            enabled: true,
            credentials_expiry_date: None,
            account_expiry_date: None,
            two_factor_enabled: false,
            sign_up_method: Some("email".to_string()),
        });
        store
    }

    #[test]
    fn resolves_an_existing_account() {
        let provider = PrincipalProvider::new(store_with_user(true), false);
        let principal = provider.load_by_username("user1").expect("should resolve");
        assert_eq!(principal.username, "user1");
        assert!(principal.has_role(RoleName::User));
    }

    #[test]
    fn missing_account_is_not_found() {
        let provider = PrincipalProvider::new(store_with_user(true), false);
        assert!(matches!(
            provider.load_by_username("ghost"),
            Err(Error::PrincipalNotFound { .. })
        ));
    }

    #[test]
    fn locked_account_resolves_when_flags_not_enforced() {
        let provider = PrincipalProvider::new(store_with_user(false), false);
        let principal = provider.load_by_username("user1").expect("should resolve");
        assert!(principal.is_usable());
    }

    #[test]
    fn locked_account_is_rejected_when_flags_enforced() {
        let provider = PrincipalProvider::new(store_with_user(false), true);
        assert!(matches!(
            provider.load_by_username("user1"),
            Err(Error::AccountUnusable { .. })
        ));
    }

    #[test]
    fn role_lookup() {
        let store = store_with_user(true);
        assert!(store.find_role_by_name(RoleName::User).is_some());
        assert!(store.find_role_by_name(RoleName::Admin).is_none());
        assert!(store.exists_by_username("user1"));
        assert!(!store.exists_by_username("ghost"));
    }
}

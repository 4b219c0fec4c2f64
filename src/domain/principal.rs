//! Principal, role, and account record types
//!
//! `AccountRecord` mirrors a row in the external account store; `Principal`
//! is the resolved identity the authorization pipeline works with. The
//! store owns account and role lifecycles, this crate only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Role names, drawn from a small fixed enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RoleName {
    /// Regular user role
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrator role
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl RoleName {
    /// Wire form of the role name
    pub fn as_str(self) -> &'static str {
        match self {
            RoleName::User => "ROLE_USER",
            RoleName::Admin => "ROLE_ADMIN",
        }
    }

}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role reference data as stored by the account store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    /// Unique role id
    pub id: i64,
    /// Role name
    pub name: RoleName,
}

/// Account row as exposed by the external account store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Unique account id
    pub id: i64,
    /// Unique username, non-empty, at most 20 characters
    pub username: String,
    /// Unique email, at most 50 characters
    pub email: String,
    /// One-way password hash, never serialized outward
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The account's role (single-valued in the store)
    pub role: RoleName,
    /// False when the account is locked
    pub account_non_locked: bool,
    /// False when the account itself has been marked expired
    pub account_non_expired: bool,
    /// False when the credentials have been marked expired
    pub credentials_non_expired: bool,
    /// Whether the account is enabled at all
    pub enabled: bool,
    /// Credentials expire on this date
    pub credentials_expiry_date: Option<NaiveDate>,
    /// Account expires on this date
    pub account_expiry_date: Option<NaiveDate>,
    /// Informational only, no 2FA challenge flow exists here
    pub two_factor_enabled: bool,
    /// How the account was created (e.g. "email")
    pub sign_up_method: Option<String>,
}

/// Resolved identity used for authorization decisions
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    /// Opaque unique identifier
    pub id: i64,
    /// Unique username
    pub username: String,
    /// Unique email
    pub email: String,
    /// One-way password hash, kept for credential verification only
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role names held by this principal
    pub roles: BTreeSet<RoleName>,
    /// Account is locked
    pub locked: bool,
    /// Account has passed its expiry date or was marked expired
    pub account_expired: bool,
    /// Credentials have passed their expiry date or were marked expired
    pub credentials_expired: bool,
    /// Account is enabled
    pub enabled: bool,
    /// Informational 2FA flag
    pub two_factor_enabled: bool,
}

impl Principal {
    /// Build a principal from a stored account record.
    ///
    /// The upstream system's identity adapter hard-coded all four account
    /// status flags to `true`, so a locked or expired account could still
    /// authenticate. That derivation is made explicit here: with
    /// `enforce_flags` off (the compatible default) the flags are reported
    /// as permissive regardless of the record; with it on they derive from
    /// the record's stored flags and expiry dates.
    pub fn from_record(record: &AccountRecord, enforce_flags: bool, today: NaiveDate) -> Self {
        let (locked, account_expired, credentials_expired, enabled) = if enforce_flags {
            (
                !record.account_non_locked,
                !record.account_non_expired || date_passed(record.account_expiry_date, today),
                !record.credentials_non_expired
                    || date_passed(record.credentials_expiry_date, today),
                record.enabled,
            )
        } else {
            (false, false, false, true)
        };

        Self {
            id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            roles: BTreeSet::from([record.role]),
            locked,
            account_expired,
            credentials_expired,
            enabled,
            two_factor_enabled: record.two_factor_enabled,
        }
    }

    /// A principal may authenticate only while all four status flags allow it
    pub fn is_usable(&self) -> bool {
        !self.locked && !self.account_expired && !self.credentials_expired && self.enabled
    }

    /// Whether this principal holds the given role
    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }

    /// Role names in wire form, for the login response
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|r| r.as_str().to_string()).collect()
    }
}

fn date_passed(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    date.is_some_and(|d| d < today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn record() -> AccountRecord {
        AccountRecord {
            id: 7,
            username: "user1".to_string(),
            email: "user1@example.com".to_string(),
            password_hash: "$2b$10$unused".to_string(),
            role: RoleName::User,
            account_non_locked: false,
            account_non_expired: true,
            credentials_non_expired: true,
            enabled: true,
            credentials_expiry_date: None,
            account_expiry_date: None,
            two_factor_enabled: false,
            sign_up_method: Some("email".to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn permissive_derivation_ignores_stored_flags() {
        // Mirrors the upstream adapter: a locked record still reports usable.
        let principal = Principal::from_record(&record(), false, today());
        assert!(principal.is_usable());
        assert!(!principal.locked);
    }

    #[test]
    fn enforced_derivation_maps_stored_flags() {
        let principal = Principal::from_record(&record(), true, today());
        assert!(principal.locked);
        assert!(!principal.is_usable());
    }

    #[test]
    fn enforced_derivation_uses_expiry_dates() {
        let mut rec = record();
        rec.account_non_locked = true;
        rec.account_expiry_date = Some(today() - Days::new(1));
        let principal = Principal::from_record(&rec, true, today());
        assert!(principal.account_expired);
        assert!(!principal.is_usable());

        rec.account_expiry_date = Some(today() + Days::new(1));
        let principal = Principal::from_record(&rec, true, today());
        assert!(!principal.account_expired);
        assert!(principal.is_usable());
    }

    #[test]
    fn expiry_date_on_today_is_not_expired() {
        let mut rec = record();
        rec.account_non_locked = true;
        rec.credentials_expiry_date = Some(today());
        let principal = Principal::from_record(&rec, true, today());
        assert!(!principal.credentials_expired);
    }

    #[test]
    fn role_membership() {
        let principal = Principal::from_record(&record(), false, today());
        assert!(principal.has_role(RoleName::User));
        assert!(!principal.has_role(RoleName::Admin));
        assert_eq!(principal.role_names(), vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn role_name_wire_form() {
        assert_eq!(RoleName::Admin.to_string(), "ROLE_ADMIN");
        assert_eq!(RoleName::User.as_str(), "ROLE_USER");
    }
}

//! Ordered URL-pattern access policy
//!
//! Rules are evaluated in configured order and the first matching pattern
//! wins, so more specific patterns must be listed before more general
//! ones; there is no implicit specificity ordering. The default policy
//! ends with a catch-all, and an empty or non-matching rule list denies.

use crate::domain::principal::{Principal, RoleName};

/// What a matched rule requires of the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Allow unconditionally
    Public,
    /// Allow any attached identity, any role
    Authenticated,
    /// Allow only identities holding this role
    Role(RoleName),
}

/// A URL pattern paired with a requirement
///
/// Patterns are either exact paths or a prefix followed by `/**`, which
/// matches the bare prefix and everything under it.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pattern: String,
    requirement: Requirement,
}

impl AccessRule {
    /// Create a rule
    pub fn new(pattern: impl Into<String>, requirement: Requirement) -> Self {
        Self {
            pattern: pattern.into(),
            requirement,
        }
    }

    fn matches(&self, path: &str) -> bool {
        if let Some(prefix) = self.pattern.strip_suffix("/**") {
            path == prefix || path.starts_with(&format!("{prefix}/"))
        } else {
            path == self.pattern
        }
    }
}

/// Outcome of a policy evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Request may proceed to the business handlers
    Allow,
    /// Request is denied with this reason
    Deny {
        /// Human-readable denial reason, surfaced in the 401 body
        reason: String,
    },
}

/// Process-wide, immutable-after-startup set of access rules
pub struct AccessControlPolicy {
    rules: Vec<AccessRule>,
}

impl AccessControlPolicy {
    /// Build a policy from an ordered rule list
    pub fn new(rules: Vec<AccessRule>) -> Self {
        Self { rules }
    }

    /// The policy this service runs with, in order: admin prefix, the
    /// CSRF-token endpoint, public auth endpoints, then an authenticated
    /// catch-all.
    pub fn default_policy() -> Self {
        Self::new(vec![
            AccessRule::new("/api/admin/**", Requirement::Role(RoleName::Admin)),
            AccessRule::new("/api/csrf-token", Requirement::Public),
            AccessRule::new("/api/auth/public/**", Requirement::Public),
            AccessRule::new("/**", Requirement::Authenticated),
        ])
    }

    /// Decide access for a request path and its resolved identity, if any
    pub fn evaluate(&self, path: &str, identity: Option<&Principal>) -> AccessDecision {
        for rule in &self.rules {
            if !rule.matches(path) {
                continue;
            }

            return match rule.requirement {
                Requirement::Public => AccessDecision::Allow,
                Requirement::Authenticated => match identity {
                    Some(_) => AccessDecision::Allow,
                    None => AccessDecision::Deny {
                        reason: "Full authentication is required to access this resource"
                            .to_string(),
                    },
                },
                Requirement::Role(role) => match identity {
                    Some(principal) if principal.has_role(role) => AccessDecision::Allow,
                    Some(_) => AccessDecision::Deny {
                        reason: "Access Denied".to_string(),
                    },
                    None => AccessDecision::Deny {
                        reason: "Full authentication is required to access this resource"
                            .to_string(),
                    },
                },
            };
        }

        // No rule matched. The default policy's catch-all makes this
        // unreachable, but a hand-built rule list must still fail closed.
        AccessDecision::Deny {
            reason: "No access rule matches this resource".to_string(),
        }
    }
}

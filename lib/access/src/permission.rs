//! Permission tokens and wildcard-aware permission sets.
//!
//! A permission names a fine-grained capability within the platform.
//! The special `all` token is a wildcard granting every capability.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A capability token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Wildcard: grants every capability.
    All,
    /// Administer platform-wide settings.
    ManageSystem,
    /// Create, update, and deactivate office user accounts.
    ManageUsers,
    /// Reset another user's password without knowing it.
    ResetPasswords,
    /// View generated reports and dashboard summaries.
    ViewReports,
    /// View issued certificates.
    ViewCertificates,
    /// Register and update land-owner records.
    ManageLandowners,
    /// Register and update land parcels.
    ManageParcels,
    /// Issue new ownership certificates.
    IssueCertificates,
}

impl Permission {
    /// Returns the token name as used in persisted sessions and route tables.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ManageSystem => "manage_system",
            Self::ManageUsers => "manage_users",
            Self::ResetPasswords => "reset_passwords",
            Self::ViewReports => "view_reports",
            Self::ViewCertificates => "view_certificates",
            Self::ManageLandowners => "manage_landowners",
            Self::ManageParcels => "manage_parcels",
            Self::IssueCertificates => "issue_certificates",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A set of permission tokens attached to an identity.
///
/// Membership checks via [`PermissionSet::allows`] honor the `all`
/// wildcard. Equality is set equality; ordering never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet {
    tokens: HashSet<Permission>,
}

impl PermissionSet {
    /// Creates an empty permission set (no capabilities).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tokens: HashSet::new(),
        }
    }

    /// Creates a set holding only the `all` wildcard.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            tokens: HashSet::from([Permission::All]),
        }
    }

    /// Returns true if the set grants the given capability.
    ///
    /// A set grants a capability when it contains the token itself or
    /// the `all` wildcard.
    #[must_use]
    pub fn allows(&self, permission: Permission) -> bool {
        self.tokens.contains(&Permission::All) || self.tokens.contains(&permission)
    }

    /// Returns true if the exact token is present, ignoring the wildcard.
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.tokens.contains(&permission)
    }

    /// Returns true if the set holds no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of tokens in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Iterates over the tokens in the set.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.tokens.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_names_are_snake_case() {
        assert_eq!(Permission::ManageSystem.as_str(), "manage_system");
        assert_eq!(Permission::All.as_str(), "all");
        assert_eq!(Permission::ManageLandowners.to_string(), "manage_landowners");
    }

    #[test]
    fn empty_set_allows_nothing() {
        let set = PermissionSet::empty();
        assert!(set.is_empty());
        assert!(!set.allows(Permission::ViewReports));
    }

    #[test]
    fn allows_exact_token() {
        let set = PermissionSet::from_iter([Permission::ManageParcels]);
        assert!(set.allows(Permission::ManageParcels));
        assert!(!set.allows(Permission::ManageSystem));
    }

    #[test]
    fn wildcard_allows_everything() {
        let set = PermissionSet::wildcard();
        assert!(set.allows(Permission::ManageSystem));
        assert!(set.allows(Permission::IssueCertificates));
        assert!(set.allows(Permission::All));
        // But the exact tokens are not literally present.
        assert!(!set.contains(Permission::ManageSystem));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = PermissionSet::from_iter([Permission::ViewReports, Permission::ManageUsers]);
        let b = PermissionSet::from_iter([Permission::ManageUsers, Permission::ViewReports]);
        assert_eq!(a, b);
    }

    #[test]
    fn serde_roundtrip_preserves_set() {
        let set = PermissionSet::from_iter([
            Permission::All,
            Permission::ViewCertificates,
            Permission::ManageLandowners,
        ]);
        let json = serde_json::to_string(&set).expect("serialize");
        let parsed: PermissionSet = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(set, parsed);
    }

    #[test]
    fn serde_format_is_token_list() {
        let set = PermissionSet::from_iter([Permission::ResetPasswords]);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, "[\"reset_passwords\"]");
    }

    #[test]
    fn unknown_token_fails_deserialization() {
        let result: Result<PermissionSet, _> = serde_json::from_str("[\"launch_rockets\"]");
        assert!(result.is_err());
    }
}

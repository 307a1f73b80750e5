//! Roles and static permission resolution.
//!
//! The platform has two office roles:
//! - `Admin`: system administration, user management, password resets
//! - `Registration`: day-to-day parcel, land-owner, and certificate work
//!
//! Each role maps to a fixed set of permission tokens, resolved at login
//! time and cached on the identity. The mapping is a pure static table.

use crate::permission::{Permission, PermissionSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse-grained access class for an office user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System administrator.
    Admin,
    /// Registration office user.
    Registration,
}

impl Role {
    /// Returns true if this role has admin privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns the role name as used in persisted sessions.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Registration => "registration",
        }
    }

    /// Returns the dashboard path users of this role land on.
    ///
    /// The access guard redirects here when a role or permission
    /// requirement is not met.
    #[must_use]
    pub fn default_dashboard(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Registration => "/registration/dashboard",
        }
    }

    /// Resolves the static permission set for this role.
    ///
    /// Total over both roles; the same role always yields the same set.
    #[must_use]
    pub fn permissions(&self) -> PermissionSet {
        match self {
            Self::Admin => PermissionSet::from_iter([
                Permission::ManageSystem,
                Permission::ManageUsers,
                Permission::ResetPasswords,
                Permission::ViewReports,
                Permission::ViewCertificates,
            ]),
            Self::Registration => PermissionSet::from_iter([
                Permission::ManageLandowners,
                Permission::ManageParcels,
                Permission::IssueCertificates,
                Permission::ViewCertificates,
            ]),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Registration.is_admin());
    }

    #[test]
    fn admin_permissions_are_fixed_five() {
        let perms = Role::Admin.permissions();
        assert_eq!(perms.len(), 5);
        assert!(perms.contains(Permission::ManageSystem));
        assert!(perms.contains(Permission::ResetPasswords));
        // Resolution is deterministic.
        assert_eq!(perms, Role::Admin.permissions());
    }

    #[test]
    fn registration_permissions_are_fixed_four() {
        let perms = Role::Registration.permissions();
        assert_eq!(perms.len(), 4);
        assert!(perms.contains(Permission::ManageLandowners));
        assert!(!perms.contains(Permission::ManageSystem));
        assert_eq!(perms, Role::Registration.permissions());
    }

    #[test]
    fn neither_role_carries_the_wildcard() {
        assert!(!Role::Admin.permissions().contains(Permission::All));
        assert!(!Role::Registration.permissions().contains(Permission::All));
    }

    #[test]
    fn dashboards_are_role_scoped() {
        assert_eq!(Role::Admin.default_dashboard(), "/admin/dashboard");
        assert_eq!(
            Role::Registration.default_dashboard(),
            "/registration/dashboard"
        );
    }

    #[test]
    fn serialization_format_is_lowercase() {
        let json = serde_json::to_string(&Role::Admin).expect("serialize");
        assert_eq!(json, "\"admin\"");

        let json = serde_json::to_string(&Role::Registration).expect("serialize");
        assert_eq!(json, "\"registration\"");
    }

    #[test]
    fn unknown_role_fails_deserialization() {
        // A persisted session naming a role this build does not know is
        // rejected wholesale rather than defaulting to some access level.
        let result: Result<Role, _> = serde_json::from_str("\"surveyor\"");
        assert!(result.is_err());
    }
}

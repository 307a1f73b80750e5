//! The authenticated principal and its persisted form.
//!
//! An `Identity` is created by the session manager on successful login,
//! from the verified credential record plus the permissions resolved for
//! its role. It is the value persisted in the session store; the secret
//! is never part of it.

use crate::permission::{Permission, PermissionSet};
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique login identifier (an email address).
    identifier: String,
    /// Human-readable name shown in the dashboard header.
    display_name: String,
    /// The principal's access class.
    role: Role,
    /// Capability tokens, resolved from the role at login time.
    permissions: PermissionSet,
}

impl Identity {
    /// Creates an identity with permissions resolved from the role.
    #[must_use]
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            role,
            permissions: role.permissions(),
        }
    }

    /// Creates an identity with an explicit permission grant.
    ///
    /// Used for principals carrying the `all` wildcard instead of the
    /// role's static set.
    #[must_use]
    pub fn with_permissions(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
        permissions: PermissionSet,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            role,
            permissions,
        }
    }

    /// Returns the login identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the principal's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the principal's permission set.
    #[must_use]
    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    /// Returns true if the principal holds the capability.
    ///
    /// Honors the `all` wildcard.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.allows(permission)
    }

    /// Merges a partial profile update into this identity.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(display_name) = &update.display_name {
            self.display_name = display_name.clone();
        }
    }
}

/// Partial fields for an in-place profile update.
///
/// Absent fields are left unchanged. The identifier, role, and
/// permissions of an identity are never updatable through a profile
/// edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name, if changing.
    pub display_name: Option<String>,
}

impl ProfileUpdate {
    /// Sets the display name field.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

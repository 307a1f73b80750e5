//! Declared access requirements for a protected area.

use landreg_access::{Permission, Role};
use serde::{Deserialize, Serialize};

/// The access requirement attached to a role-scoped area.
///
/// An empty role list admits any authenticated role; an empty
/// permission list requires none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    /// Roles allowed to enter. Empty means any role.
    #[serde(default)]
    pub allowed_roles: Vec<Role>,
    /// Permission tokens the identity must hold. Empty means none.
    #[serde(default)]
    pub required_permissions: Vec<Permission>,
}

impl RouteRequirement {
    /// A requirement satisfied by any authenticated identity.
    #[must_use]
    pub fn authenticated() -> Self {
        Self::default()
    }

    /// A requirement admitting only the given role.
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        Self {
            allowed_roles: vec![role],
            required_permissions: Vec::new(),
        }
    }

    /// Adds a role to the allowed list.
    #[must_use]
    pub fn allow_role(mut self, role: Role) -> Self {
        self.allowed_roles.push(role);
        self
    }

    /// Adds a required permission token.
    #[must_use]
    pub fn require(mut self, permission: Permission) -> Self {
        self.required_permissions.push(permission);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_requirement_is_empty() {
        let requirement = RouteRequirement::authenticated();
        assert!(requirement.allowed_roles.is_empty());
        assert!(requirement.required_permissions.is_empty());
    }

    #[test]
    fn builder_accumulates_roles_and_permissions() {
        let requirement = RouteRequirement::for_role(Role::Admin)
            .allow_role(Role::Registration)
            .require(Permission::ViewReports)
            .require(Permission::ViewCertificates);

        assert_eq!(
            requirement.allowed_roles,
            vec![Role::Admin, Role::Registration]
        );
        assert_eq!(
            requirement.required_permissions,
            vec![Permission::ViewReports, Permission::ViewCertificates]
        );
    }

    #[test]
    fn deserializes_from_a_route_table_entry() {
        let requirement: RouteRequirement = serde_json::from_str(
            "{\"allowed_roles\":[\"admin\"],\"required_permissions\":[\"manage_users\"]}",
        )
        .expect("deserialize");

        assert_eq!(requirement.allowed_roles, vec![Role::Admin]);
        assert_eq!(
            requirement.required_permissions,
            vec![Permission::ManageUsers]
        );
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let requirement: RouteRequirement = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(requirement, RouteRequirement::authenticated());
    }
}

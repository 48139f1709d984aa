//! Role entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::id::{RoleId, TeamId};

/// A team-scoped role with a business-defined permission set.
///
/// Permissions are opaque strings, not an enum: the set is extensible per
/// business. `user_count` mirrors the membership rows referencing the role
/// and is mutated only inside the membership transaction.
#[derive(Debug, Clone, Serialize)]
pub struct Role {
    id: RoleId,
    team_id: TeamId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    permissions: Vec<String>,
    user_count: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Role {
    pub fn new(
        id: RoleId,
        team_id: TeamId,
        name: impl Into<String>,
        permissions: Vec<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id,
            team_id,
            name: name.into(),
            description: None,
            permissions,
            user_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a role from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: RoleId,
        team_id: TeamId,
        name: String,
        description: Option<String>,
        permissions: Vec<String>,
        user_count: i32,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            team_id,
            name,
            description,
            permissions,
            user_count,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &RoleId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn user_count(&self) -> i32 {
        self.user_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the role carries a given permission
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    // Counter mutators, called only from inside the membership transaction

    pub(crate) fn record_user_added(&mut self) {
        self.user_count += 1;
        self.updated_at = Utc::now();
    }

    /// Floored at zero, mirroring the team member counter.
    pub(crate) fn record_user_removed(&mut self) {
        self.user_count = (self.user_count - 1).max(0);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_permissions() {
        let role = Role::new(
            RoleId::new("role-1").unwrap(),
            TeamId::new("team-1").unwrap(),
            "Analyst",
            vec!["read_expense".to_string(), "read_budget".to_string()],
        );

        assert!(role.has_permission("read_expense"));
        assert!(!role.has_permission("delete_budget"));
        assert_eq!(role.user_count(), 0);
    }

    #[test]
    fn test_user_count_floors_at_zero() {
        let mut role = Role::new(
            RoleId::new("role-1").unwrap(),
            TeamId::new("team-1").unwrap(),
            "Analyst",
            Vec::new(),
        );

        role.record_user_removed();
        assert_eq!(role.user_count(), 0);

        role.record_user_added();
        role.record_user_added();
        role.record_user_removed();
        assert_eq!(role.user_count(), 1);
    }
}

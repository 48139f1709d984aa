//! Team membership entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::id::{MemberId, RoleId, TeamId, UserId};

/// Associates one user with one team and at most one role within it.
/// Unique on (team_id, user_id); the row is the authoritative truth that the
/// denormalized counters mirror.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    id: MemberId,
    team_id: TeamId,
    user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    role_id: Option<RoleId>,
    joined_at: DateTime<Utc>,
}

impl TeamMember {
    /// Create a new membership record with a generated ID
    pub fn new(team_id: TeamId, user_id: UserId, role_id: Option<RoleId>) -> Self {
        Self {
            id: MemberId::generate(),
            team_id,
            user_id,
            role_id,
            joined_at: Utc::now(),
        }
    }

    /// Rebuild a membership record from stored fields
    pub fn from_parts(
        id: MemberId,
        team_id: TeamId,
        user_id: UserId,
        role_id: Option<RoleId>,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            team_id,
            user_id,
            role_id,
            joined_at,
        }
    }

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role_id(&self) -> Option<&RoleId> {
        self.role_id.as_ref()
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_member_has_generated_id() {
        let member = TeamMember::new(
            TeamId::new("team-1").unwrap(),
            UserId::new("user-1").unwrap(),
            Some(RoleId::new("role-1").unwrap()),
        );

        assert!(member.id().as_str().starts_with("member_"));
        assert_eq!(member.team_id().as_str(), "team-1");
        assert!(member.role_id().is_some());
    }
}

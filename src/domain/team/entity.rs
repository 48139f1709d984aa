//! Team entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{validate_team_name, TeamValidationError};
use crate::domain::id::{BusinessId, TeamId, UserId};

/// A team inside a business tenant.
///
/// `member_count` is a denormalized mirror of the live membership rows; it
/// is only ever mutated in the same transaction as the rows themselves.
/// Inactive teams are invisible to lookups and to the policy engine.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    id: TeamId,
    business_id: BusinessId,
    admin_user_id: UserId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    member_count: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Create a new active team
    pub fn new(
        id: TeamId,
        business_id: BusinessId,
        admin_user_id: UserId,
        name: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id,
            business_id,
            admin_user_id,
            name,
            description: None,
            member_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Rebuild a team from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: TeamId,
        business_id: BusinessId,
        admin_user_id: UserId,
        name: String,
        description: Option<String>,
        member_count: i32,
        is_active: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            business_id,
            admin_user_id,
            name,
            description,
            member_count,
            is_active,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn business_id(&self) -> &BusinessId {
        &self.business_id
    }

    pub fn admin_user_id(&self) -> &UserId {
        &self.admin_user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn member_count(&self) -> i32 {
        self.member_count
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the given user is this team's admin
    pub fn is_admin(&self, user_id: &UserId) -> bool {
        &self.admin_user_id == user_id
    }

    // Counter mutators, called only from inside the membership transaction

    pub(crate) fn record_member_added(&mut self) {
        self.member_count += 1;
        self.updated_at = Utc::now();
    }

    /// Floored at zero: the membership rows are authoritative, a drifted
    /// counter must not block the deletion.
    pub(crate) fn record_member_removed(&mut self) {
        self.member_count = (self.member_count - 1).max(0);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_team() -> Team {
        Team::new(
            TeamId::new("team-1").unwrap(),
            BusinessId::new("biz-1").unwrap(),
            UserId::new("admin-1").unwrap(),
            "Finance",
        )
        .unwrap()
    }

    #[test]
    fn test_team_creation() {
        let team = test_team();
        assert_eq!(team.name(), "Finance");
        assert_eq!(team.member_count(), 0);
        assert!(team.is_active());
        assert!(team.description().is_none());
    }

    #[test]
    fn test_team_invalid_name() {
        let result = Team::new(
            TeamId::new("team-1").unwrap(),
            BusinessId::new("biz-1").unwrap(),
            UserId::new("admin-1").unwrap(),
            "",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_is_admin() {
        let team = test_team();
        assert!(team.is_admin(&UserId::new("admin-1").unwrap()));
        assert!(!team.is_admin(&UserId::new("user-9").unwrap()));
    }

    #[test]
    fn test_with_description() {
        let team = test_team().with_description("Handles budgets");
        assert_eq!(team.description(), Some("Handles budgets"));
    }

    #[test]
    fn test_member_count_floors_at_zero() {
        let mut team = test_team();

        team.record_member_added();
        assert_eq!(team.member_count(), 1);

        team.record_member_removed();
        assert_eq!(team.member_count(), 0);

        team.record_member_removed();
        assert_eq!(team.member_count(), 0);
    }
}

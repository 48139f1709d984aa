//! Membership repository trait
//!
//! The repository owns the atomic unit of the membership state machine:
//! a membership row never commits without its two counter updates, and a
//! crash or conflict mid-operation leaves no partial state behind.

use async_trait::async_trait;

use super::entity::TeamMember;
use crate::domain::id::{TeamId, UserId};
use crate::domain::DomainError;

/// Repository for team membership rows and their denormalized counters
#[async_trait]
pub trait MembershipRepository: Send + Sync + std::fmt::Debug {
    /// Get the membership row for (team, user), if any
    async fn get(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError>;

    /// List all memberships of a user (used to build the sign-in snapshot)
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<TeamMember>, DomainError>;

    /// Insert a membership row and, in the same transaction, increment the
    /// team's `member_count` and the role's `user_count`. A concurrent or
    /// pre-existing row for the same (team, user) surfaces as `Conflict`
    /// and leaves the counters untouched.
    async fn insert(&self, member: TeamMember) -> Result<TeamMember, DomainError>;

    /// Delete the membership row for (team, user) and, in the same
    /// transaction, decrement the team's `member_count` and the member's
    /// role `user_count` (if a role was assigned), both floored at zero.
    /// Returns the removed row, or `None` when no membership existed (in
    /// which case nothing is mutated).
    async fn remove(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError>;
}

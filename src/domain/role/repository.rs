//! Role repository trait

use async_trait::async_trait;

use super::entity::Role;
use crate::domain::id::{RoleId, TeamId};
use crate::domain::DomainError;

/// Repository for team-scoped roles
#[async_trait]
pub trait RoleRepository: Send + Sync + std::fmt::Debug {
    /// Get a role by ID
    async fn get(&self, id: &RoleId) -> Result<Option<Role>, DomainError>;

    /// Get a role only if it belongs to the given team
    async fn get_in_team(
        &self,
        id: &RoleId,
        team_id: &TeamId,
    ) -> Result<Option<Role>, DomainError>;

    /// Create a new role
    async fn create(&self, role: Role) -> Result<Role, DomainError>;
}

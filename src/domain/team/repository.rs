//! Team repository trait

use async_trait::async_trait;

use super::entity::Team;
use crate::domain::id::{BusinessId, TeamId};
use crate::domain::DomainError;

/// Repository for teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID regardless of tenant or status
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Tenant-scoped lookup: the team must belong to `business_id` and be
    /// active. A team in another business is indistinguishable from a
    /// nonexistent one.
    async fn get_active_in_business(
        &self,
        id: &TeamId,
        business_id: &BusinessId,
    ) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;
}

//! Business repository trait

use async_trait::async_trait;

use super::entity::Business;
use crate::domain::id::BusinessId;
use crate::domain::DomainError;

/// Repository for business tenants
#[async_trait]
pub trait BusinessRepository: Send + Sync + std::fmt::Debug {
    /// Get a business by ID
    async fn get(&self, id: &BusinessId) -> Result<Option<Business>, DomainError>;

    /// Create a new business
    async fn create(&self, business: Business) -> Result<Business, DomainError>;
}

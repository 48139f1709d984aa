//! User repository trait

use async_trait::async_trait;

use super::entity::User;
use crate::domain::id::{BusinessId, UserId};
use crate::domain::DomainError;

/// Repository for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug {
    /// Get a user by ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by email address
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get a user only if they belong to the given business
    async fn get_in_business(
        &self,
        id: &UserId,
        business_id: &BusinessId,
    ) -> Result<Option<User>, DomainError>;

    /// Create a new user; fails with `Conflict` on duplicate email
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;
}

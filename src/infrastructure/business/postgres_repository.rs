//! PostgreSQL business repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::business::{Business, BusinessRepository};
use crate::domain::id::{BusinessId, UserId};
use crate::domain::DomainError;

/// PostgreSQL implementation of BusinessRepository
#[derive(Debug, Clone)]
pub struct PostgresBusinessRepository {
    pool: PgPool,
}

impl PostgresBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
    async fn get(&self, id: &BusinessId) -> Result<Option<Business>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, owner_id, created_at FROM businesses WHERE id = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get business: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_business(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, business: Business) -> Result<Business, DomainError> {
        sqlx::query(
            "INSERT INTO businesses (id, name, owner_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(business.id().as_str())
        .bind(business.name())
        .bind(business.owner_id().as_str())
        .bind(business.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Business with ID '{}' already exists",
                    business.id().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to create business: {}", e))
            }
        })?;

        Ok(business)
    }
}

fn row_to_business(row: &sqlx::postgres::PgRow) -> Result<Business, DomainError> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");

    let id = BusinessId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid business ID in database: {}", e)))?;
    let owner_id = UserId::new(&owner_id)
        .map_err(|e| DomainError::storage(format!("Invalid owner ID in database: {}", e)))?;

    Ok(Business::from_parts(
        id,
        row.get("name"),
        owner_id,
        row.get("created_at"),
    ))
}

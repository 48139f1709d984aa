//! PostgreSQL role repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::id::{RoleId, TeamId};
use crate::domain::role::{Role, RoleRepository};
use crate::domain::DomainError;

const ROLE_COLUMNS: &str = "id, team_id, name, description, permissions, user_count, \
                            created_at, updated_at";

/// PostgreSQL implementation of RoleRepository
#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn get(&self, id: &RoleId) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM roles WHERE id = $1",
            ROLE_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get role: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_role(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_in_team(
        &self,
        id: &RoleId,
        team_id: &TeamId,
    ) -> Result<Option<Role>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM roles WHERE id = $1 AND team_id = $2",
            ROLE_COLUMNS
        ))
        .bind(id.as_str())
        .bind(team_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get role in team: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_role(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, role: Role) -> Result<Role, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO roles (id, team_id, name, description, permissions, user_count,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(role.id().as_str())
        .bind(role.team_id().as_str())
        .bind(role.name())
        .bind(role.description())
        .bind(role.permissions())
        .bind(role.user_count())
        .bind(role.created_at())
        .bind(role.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Role with ID '{}' already exists",
                    role.id().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to create role: {}", e))
            }
        })?;

        Ok(role)
    }
}

fn row_to_role(row: &sqlx::postgres::PgRow) -> Result<Role, DomainError> {
    let id: String = row.get("id");
    let team_id: String = row.get("team_id");

    let id = RoleId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid role ID in database: {}", e)))?;
    let team_id = TeamId::new(&team_id)
        .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?;

    Ok(Role::from_parts(
        id,
        team_id,
        row.get("name"),
        row.get("description"),
        row.get("permissions"),
        row.get("user_count"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}

//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::id::{BusinessId, TeamId, UserId};
use crate::domain::team::{Team, TeamRepository};
use crate::domain::DomainError;

const TEAM_COLUMNS: &str = "id, business_id, admin_user_id, name, description, member_count, \
                            is_active, created_at, updated_at";

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE id = $1",
            TEAM_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_active_in_business(
        &self,
        id: &TeamId,
        business_id: &BusinessId,
    ) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE id = $1 AND business_id = $2 AND is_active",
            TEAM_COLUMNS
        ))
        .bind(id.as_str())
        .bind(business_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get team in business: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_team(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO teams (id, business_id, admin_user_id, name, description,
                               member_count, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(team.id().as_str())
        .bind(team.business_id().as_str())
        .bind(team.admin_user_id().as_str())
        .bind(team.name())
        .bind(team.description())
        .bind(team.member_count())
        .bind(team.is_active())
        .bind(team.created_at())
        .bind(team.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Team with ID '{}' already exists",
                    team.id().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to create team: {}", e))
            }
        })?;

        Ok(team)
    }
}

pub(crate) fn row_to_team(row: &sqlx::postgres::PgRow) -> Result<Team, DomainError> {
    let id: String = row.get("id");
    let business_id: String = row.get("business_id");
    let admin_user_id: String = row.get("admin_user_id");

    let id = TeamId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?;
    let business_id = BusinessId::new(&business_id)
        .map_err(|e| DomainError::storage(format!("Invalid business ID in database: {}", e)))?;
    let admin_user_id = UserId::new(&admin_user_id)
        .map_err(|e| DomainError::storage(format!("Invalid admin user ID in database: {}", e)))?;

    Ok(Team::from_parts(
        id,
        business_id,
        admin_user_id,
        row.get("name"),
        row.get("description"),
        row.get("member_count"),
        row.get("is_active"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}

//! PostgreSQL membership repository implementation
//!
//! Each mutation runs the membership row and both counter updates in one
//! transaction, so a conflict or crash rolls back everything together.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::id::{MemberId, RoleId, TeamId, UserId};
use crate::domain::membership::{MembershipRepository, TeamMember};
use crate::domain::DomainError;

/// PostgreSQL implementation of MembershipRepository
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn get(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, team_id, user_id, role_id, joined_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get membership: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_member(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<TeamMember>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, team_id, user_id, role_id, joined_at
            FROM team_members
            WHERE user_id = $1
            ORDER BY joined_at
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list memberships: {}", e)))?;

        let mut members = Vec::with_capacity(rows.len());

        for row in rows {
            members.push(row_to_member(&row)?);
        }

        Ok(members)
    }

    async fn insert(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO team_members (id, team_id, user_id, role_id, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id().as_str())
        .bind(member.team_id().as_str())
        .bind(member.user_id().as_str())
        .bind(member.role_id().map(|r| r.as_str()))
        .bind(member.joined_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "User '{}' is already a member of team '{}'",
                    member.user_id().as_str(),
                    member.team_id().as_str()
                ))
            } else {
                DomainError::storage(format!("Failed to insert membership: {}", e))
            }
        })?;

        sqlx::query(
            "UPDATE teams SET member_count = member_count + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(member.team_id().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to increment member count: {}", e)))?;

        if let Some(role_id) = member.role_id() {
            sqlx::query(
                "UPDATE roles SET user_count = user_count + 1, updated_at = NOW() WHERE id = $1",
            )
            .bind(role_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to increment user count: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit membership: {}", e)))?;

        Ok(member)
    }

    async fn remove(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let row = sqlx::query(
            r#"
            DELETE FROM team_members
            WHERE team_id = $1 AND user_id = $2
            RETURNING id, team_id, user_id, role_id, joined_at
            "#,
        )
        .bind(team_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to delete membership: {}", e)))?;

        let Some(row) = row else {
            tx.rollback()
                .await
                .map_err(|e| DomainError::storage(format!("Failed to roll back: {}", e)))?;
            return Ok(None);
        };

        let member = row_to_member(&row)?;

        // Counters floor at zero; the deleted row is authoritative even if a
        // counter had drifted.
        sqlx::query(
            r#"
            UPDATE teams
            SET member_count = GREATEST(member_count - 1, 0), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(team_id.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to decrement member count: {}", e)))?;

        if let Some(role_id) = member.role_id() {
            sqlx::query(
                r#"
                UPDATE roles
                SET user_count = GREATEST(user_count - 1, 0), updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(role_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to decrement user count: {}", e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit removal: {}", e)))?;

        Ok(Some(member))
    }
}

fn row_to_member(row: &sqlx::postgres::PgRow) -> Result<TeamMember, DomainError> {
    let id: String = row.get("id");
    let team_id: String = row.get("team_id");
    let user_id: String = row.get("user_id");
    let role_id: Option<String> = row.get("role_id");

    let id = MemberId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid member ID in database: {}", e)))?;
    let team_id = TeamId::new(&team_id)
        .map_err(|e| DomainError::storage(format!("Invalid team ID in database: {}", e)))?;
    let user_id = UserId::new(&user_id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;
    let role_id = role_id
        .map(|r| RoleId::new(&r))
        .transpose()
        .map_err(|e| DomainError::storage(format!("Invalid role ID in database: {}", e)))?;

    Ok(TeamMember::from_parts(
        id,
        team_id,
        user_id,
        role_id,
        row.get("joined_at"),
    ))
}

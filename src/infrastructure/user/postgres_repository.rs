//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::auth::AccountType;
use crate::domain::id::{BusinessId, UserId};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str = "id, name, email, password_hash, account_type, business_id, phone, \
                            created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_in_business(
        &self,
        id: &UserId,
        business_id: &BusinessId,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1 AND business_id = $2",
            USER_COLUMNS
        ))
        .bind(id.as_str())
        .bind(business_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user in business: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, account_type, business_id,
                               phone, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(account_type_to_str(user.account_type()))
        .bind(user.business_id().map(|b| b.as_str()))
        .bind(user.phone())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!("Email '{}' is already registered", user.email()))
            } else {
                DomainError::storage(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, password_hash = $4, account_type = $5,
                business_id = $6, phone = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.name())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(account_type_to_str(user.account_type()))
        .bind(user.business_id().map(|b| b.as_str()))
        .bind(user.phone())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update user: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id().as_str()
            )));
        }

        Ok(user.clone())
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let id: String = row.get("id");
    let business_id: Option<String> = row.get("business_id");

    let user_id = UserId::new(&id)
        .map_err(|e| DomainError::storage(format!("Invalid user ID in database: {}", e)))?;
    let business_id = business_id
        .map(|b| BusinessId::new(&b))
        .transpose()
        .map_err(|e| DomainError::storage(format!("Invalid business ID in database: {}", e)))?;

    let account_type: String = row.get("account_type");

    Ok(User::from_parts(
        user_id,
        row.get("name"),
        row.get("email"),
        row.get("password_hash"),
        str_to_account_type(&account_type),
        business_id,
        row.get("phone"),
        row.get("created_at"),
        row.get("updated_at"),
    ))
}

pub(crate) fn account_type_to_str(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Individual => "individual",
        AccountType::Business => "business",
    }
}

pub(crate) fn str_to_account_type(s: &str) -> AccountType {
    match s {
        "business" => AccountType::Business,
        _ => AccountType::Individual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_conversion() {
        assert_eq!(account_type_to_str(AccountType::Individual), "individual");
        assert_eq!(account_type_to_str(AccountType::Business), "business");

        assert_eq!(str_to_account_type("business"), AccountType::Business);
        assert_eq!(str_to_account_type("individual"), AccountType::Individual);
        assert_eq!(str_to_account_type("unknown"), AccountType::Individual);
    }
}

//! User service for sign-up, credential checks and profile updates

use std::sync::Arc;

use tracing::info;

use crate::domain::auth::AccountType;
use crate::domain::id::UserId;
use crate::domain::user::{validate_email, validate_password, User, UserRepository};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub account_type: AccountType,
}

/// Request for updating the caller's own profile
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// User service for registration and authentication
#[derive(Debug)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user account
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.get_by_email(&request.email).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "User with email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let mut user = User::new(
            UserId::generate(),
            &request.email,
            password_hash,
            request.account_type,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(name) = request.name {
            user = user.with_name(name);
        }

        info!(user_id = %user.id(), "Registered user");
        self.repository.create(user).await
    }

    /// Check credentials; `None` for unknown email, passwordless account or
    /// wrong password alike, so callers cannot tell which one failed.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let Some(user) = self.repository.get_by_email(email).await? else {
            return Ok(None);
        };

        let Some(hash) = user.password_hash() else {
            return Ok(None);
        };

        if self.hasher.verify(password, hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Get a user by ID
    pub async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    /// Update the caller's own profile (name and phone only)
    pub async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        if let Some(name) = request.name {
            user.set_name(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if let Some(phone) = request.phone {
            user.set_phone(Some(phone));
        }

        self.repository.update(&user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryUserRepository;
    use crate::infrastructure::user::Argon2Hasher;

    fn create_service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    fn register_request(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
            password: "super-secret".to_string(),
            name: Some("Alice".to_string()),
            account_type: AccountType::Individual,
        }
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = create_service();

        let user = service
            .register(register_request("alice@example.com"))
            .await
            .unwrap();
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.name(), Some("Alice"));

        let authed = service
            .authenticate("alice@example.com", "super-secret")
            .await
            .unwrap();
        assert!(authed.is_some());

        let wrong = service
            .authenticate("alice@example.com", "wrong-password")
            .await
            .unwrap();
        assert!(wrong.is_none());

        let unknown = service
            .authenticate("bob@example.com", "super-secret")
            .await
            .unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service
            .register(register_request("alice@example.com"))
            .await
            .unwrap();

        let result = service.register(register_request("alice@example.com")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = create_service();

        let mut request = register_request("alice@example.com");
        request.password = "short".to_string();

        let result = service.register(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_profile() {
        let service = create_service();

        let user = service
            .register(register_request("alice@example.com"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                user.id(),
                UpdateProfileRequest {
                    name: Some("Alice B".to_string()),
                    phone: Some("+1 555 0100".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), Some("Alice B"));
        assert_eq!(updated.phone(), Some("+1 555 0100"));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_blank_name() {
        let service = create_service();

        let user = service
            .register(register_request("alice@example.com"))
            .await
            .unwrap();

        let result = service
            .update_profile(
                user.id(),
                UpdateProfileRequest {
                    name: Some("   ".to_string()),
                    phone: None,
                },
            )
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_unknown_user() {
        let service = create_service();

        let result = service
            .update_profile(
                &UserId::new("ghost").unwrap(),
                UpdateProfileRequest::default(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}

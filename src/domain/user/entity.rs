//! User entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::validation::{validate_email, validate_user_name, UserValidationError};
use crate::domain::auth::AccountType;
use crate::domain::id::{BusinessId, UserId};

/// User account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    email: String,
    #[serde(skip_serializing)]
    password_hash: Option<String>,
    account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    business_id: Option<BusinessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user account
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        account_type: AccountType,
    ) -> Result<Self, UserValidationError> {
        let email = email.into();
        validate_email(&email)?;
        let now = Utc::now();

        Ok(Self {
            id,
            name: None,
            email,
            password_hash: Some(password_hash.into()),
            account_type,
            business_id: None,
            phone: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Set display name (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach the user to a business tenant (builder pattern)
    pub fn with_business(mut self, business_id: BusinessId) -> Self {
        self.business_id = Some(business_id);
        self
    }

    /// Rebuild a user from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: UserId,
        name: Option<String>,
        email: String,
        password_hash: Option<String>,
        account_type: AccountType,
        business_id: Option<BusinessId>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            account_type,
            business_id,
            phone,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn business_id(&self) -> Option<&BusinessId> {
        self.business_id.as_ref()
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the user belongs to the given business
    pub fn belongs_to(&self, business_id: &BusinessId) -> bool {
        self.business_id.as_ref() == Some(business_id)
    }

    // Mutators

    /// Update the display name
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), UserValidationError> {
        let name = name.into();
        validate_user_name(&name)?;
        self.name = Some(name.trim().to_string());
        self.touch();
        Ok(())
    }

    /// Update the phone number; empty input clears it
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            UserId::new("user-1").unwrap(),
            "alice@example.com",
            "hashed",
            AccountType::Business,
        )
        .unwrap()
    }

    #[test]
    fn test_user_creation() {
        let user = test_user();
        assert_eq!(user.email(), "alice@example.com");
        assert_eq!(user.password_hash(), Some("hashed"));
        assert!(user.name().is_none());
        assert!(user.business_id().is_none());
    }

    #[test]
    fn test_user_invalid_email() {
        let result = User::new(
            UserId::new("user-1").unwrap(),
            "nope",
            "hashed",
            AccountType::Individual,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_user_builders() {
        let biz = BusinessId::new("biz-1").unwrap();
        let user = test_user().with_name("Alice").with_business(biz.clone());

        assert_eq!(user.name(), Some("Alice"));
        assert!(user.belongs_to(&biz));
        assert!(!user.belongs_to(&BusinessId::new("biz-2").unwrap()));
    }

    #[test]
    fn test_set_name_validates() {
        let mut user = test_user();
        assert!(user.set_name("  ").is_err());

        user.set_name("Alice B").unwrap();
        assert_eq!(user.name(), Some("Alice B"));
    }

    #[test]
    fn test_set_phone_clears_blank() {
        let mut user = test_user();

        user.set_phone(Some("+1 555 0100".to_string()));
        assert_eq!(user.phone(), Some("+1 555 0100"));

        user.set_phone(Some("   ".to_string()));
        assert!(user.phone().is_none());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_string(&test_user()).unwrap();
        assert!(!json.contains("hashed"));
        assert!(!json.contains("password_hash"));
    }
}

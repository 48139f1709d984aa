//! Business (tenant) entity

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::id::{BusinessId, UserId};

/// A business tenant. Every team and business user hangs off exactly one of
/// these; `owner_id` grants implicit manage access over all of its teams.
#[derive(Debug, Clone, Serialize)]
pub struct Business {
    id: BusinessId,
    name: String,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Business {
    pub fn new(id: BusinessId, name: impl Into<String>, owner_id: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a business from stored fields
    pub fn from_parts(
        id: BusinessId,
        name: String,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            owner_id,
            created_at,
        }
    }

    pub fn id(&self) -> &BusinessId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check whether the given user owns this business
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ownership() {
        let owner = UserId::new("user-1").unwrap();
        let business = Business::new(BusinessId::new("biz-1").unwrap(), "Acme", owner.clone());

        assert!(business.is_owned_by(&owner));
        assert!(!business.is_owned_by(&UserId::new("user-2").unwrap()));
        assert_eq!(business.name(), "Acme");
    }
}

//! Resolved request identity

use serde::{Deserialize, Serialize};

use crate::domain::id::{BusinessId, RoleId, TeamId, UserId};

/// Kind of account a user signed up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Personal account, no tenancy
    #[default]
    Individual,
    /// Member of a business tenant
    Business,
}

impl AccountType {
    pub fn is_business(&self) -> bool {
        matches!(self, Self::Business)
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "individual"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// Snapshot of one team membership carried in the session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMembershipSummary {
    pub team_id: TeamId,
    pub team_name: String,
    pub role_id: Option<RoleId>,
    pub role_name: Option<String>,
    /// Opaque permission names attached to the role
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Identity of the caller for the duration of one request.
///
/// Built from verified token claims by the session extractor and dropped at
/// the end of the request. Identity and tenancy fields may be trusted as-is;
/// team/role entries are a snapshot taken at sign-in and can be stale, so
/// anything gating a mutation (team admin, business owner) is re-read from
/// the store by the policy engine instead.
#[derive(Debug, Clone)]
pub struct ActorContext {
    pub user_id: UserId,
    pub email: String,
    pub account_type: AccountType,
    pub business_id: Option<BusinessId>,
    pub teams: Vec<TeamMembershipSummary>,
}

impl ActorContext {
    /// The actor's tenancy, or a denial for individual accounts
    pub fn require_business(&self) -> Option<&BusinessId> {
        self.business_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type() {
        assert!(AccountType::Business.is_business());
        assert!(!AccountType::Individual.is_business());
        assert_eq!(AccountType::Business.to_string(), "business");
        assert_eq!(AccountType::default(), AccountType::Individual);
    }

    #[test]
    fn test_require_business() {
        let actor = ActorContext {
            user_id: UserId::new("user-1").unwrap(),
            email: "a@b.test".to_string(),
            account_type: AccountType::Individual,
            business_id: None,
            teams: Vec::new(),
        };
        assert!(actor.require_business().is_none());

        let biz = BusinessId::new("biz-1").unwrap();
        let actor = ActorContext {
            business_id: Some(biz.clone()),
            account_type: AccountType::Business,
            ..actor
        };
        assert_eq!(actor.require_business(), Some(&biz));
    }
}

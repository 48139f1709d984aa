//! Identifier newtypes shared across the domain
//!
//! All entity IDs are opaque strings: alphanumeric plus hyphen/underscore,
//! max 64 characters. Generated IDs are prefixed UUIDs
//! (e.g. `member_3f2a…`) so they are recognizable in logs.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur when parsing an identifier
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0} cannot exceed {1} characters")]
    TooLong(&'static str, usize),

    #[error("{0} can only contain alphanumeric characters, hyphens and underscores")]
    InvalidCharacters(&'static str),
}

const MAX_ID_LENGTH: usize = 64;

fn validate_id(value: &str, what: &'static str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty(what));
    }

    if value.len() > MAX_ID_LENGTH {
        return Err(IdError::TooLong(what, MAX_ID_LENGTH));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(IdError::InvalidCharacters(what));
    }

    Ok(())
}

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident, $what:literal, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new ID after validation
            pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
                let value = value.into();
                validate_id(&value, $what)?;
                Ok(Self(value))
            }

            /// Generate a fresh prefixed ID
            pub fn generate() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identifier!(
    /// User identifier
    UserId, "User ID", "user"
);

identifier!(
    /// Business (tenant) identifier
    BusinessId, "Business ID", "biz"
);

identifier!(
    /// Team identifier
    TeamId, "Team ID", "team"
);

identifier!(
    /// Role identifier
    RoleId, "Role ID", "role"
);

identifier!(
    /// Team membership record identifier
    MemberId, "Member ID", "member"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ids() {
        assert_eq!(UserId::new("user-1").unwrap().as_str(), "user-1");
        assert_eq!(TeamId::new("team_42").unwrap().as_str(), "team_42");
        assert_eq!(
            BusinessId::new("b9f1c2d3").unwrap().as_str(),
            "b9f1c2d3"
        );
    }

    #[test]
    fn test_empty_id() {
        assert_eq!(UserId::new(""), Err(IdError::Empty("User ID")));
    }

    #[test]
    fn test_id_too_long() {
        let long = "a".repeat(65);
        assert_eq!(TeamId::new(&long), Err(IdError::TooLong("Team ID", 64)));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            RoleId::new("role name"),
            Err(IdError::InvalidCharacters("Role ID"))
        );
        assert_eq!(
            RoleId::new("role.name"),
            Err(IdError::InvalidCharacters("Role ID"))
        );
    }

    #[test]
    fn test_generated_ids_are_valid_and_unique() {
        let a = MemberId::generate();
        let b = MemberId::generate();

        assert!(a.as_str().starts_with("member_"));
        assert_ne!(a, b);
        assert!(MemberId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_serde_round_trip() {
        let id = TeamId::new("team-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"team-1\"");

        let parsed: TeamId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<TeamId>("\"bad id\"").is_err());
    }
}

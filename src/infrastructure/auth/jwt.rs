//! Session token issuing and verification

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

use crate::domain::auth::{AccountType, ActorContext, TeamMembershipSummary};
use crate::domain::id::{BusinessId, UserId};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Token verification failures.
///
/// `Expired` is kept separate from `Invalid` so callers can tell the user
/// their session ran out instead of treating it like a forged credential.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Session token expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    Invalid(String),
}

/// Claims embedded in a session token.
///
/// Identity and tenancy (`sub`, `email`, `account_type`, `business_id`) may
/// be trusted for the token's lifetime. `teams` is a snapshot taken at
/// sign-in; ownership and admin facts are re-verified against the store
/// before any mutating decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<BusinessId>,
    #[serde(default)]
    pub teams: Vec<TeamMembershipSummary>,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a freshly authenticated user
    pub fn new(user: &User, teams: Vec<TeamMembershipSummary>, ttl_days: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(ttl_days as i64);

        Self {
            sub: user.id().as_str().to_string(),
            email: user.email().to_string(),
            account_type: user.account_type(),
            business_id: user.business_id().cloned(),
            teams,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Map verified claims into a per-request actor context
    pub fn into_actor(self) -> Result<ActorContext, TokenError> {
        let user_id = UserId::new(&self.sub)
            .map_err(|e| TokenError::Invalid(format!("Bad subject claim: {}", e)))?;

        Ok(ActorContext {
            user_id,
            email: self.email,
            account_type: self.account_type,
            business_id: self.business_id,
            teams: self.teams,
        })
    }
}

/// Trait for session token operations
pub trait TokenCodec: Send + Sync + Debug {
    /// Issue a signed session token for the given claims
    fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError>;

    /// Verify a token and return its claims
    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError>;

    /// Session lifetime in days
    fn ttl_days(&self) -> u64;
}

/// Configuration for the JWT codec
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Session lifetime in days
    pub session_ttl_days: u64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, session_ttl_days: u64) -> Self {
        Self {
            secret: secret.into(),
            session_ttl_days,
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            session_ttl_days: 7,
        }
    }
}

/// HS256 JWT implementation of the token codec
#[derive(Clone)]
pub struct JwtTokenCodec {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenCodec")
            .field("session_ttl_days", &self.config.session_ttl_days)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtTokenCodec {
    /// Create a new codec with the given configuration
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, claims: &SessionClaims) -> Result<String, DomainError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign session token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    fn ttl_days(&self) -> u64 {
        self.config.session_ttl_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{RoleId, TeamId};

    fn test_user() -> User {
        User::new(
            UserId::new("user-1").unwrap(),
            "alice@example.com",
            "hashed",
            AccountType::Business,
        )
        .unwrap()
        .with_business(BusinessId::new("biz-1").unwrap())
    }

    fn test_teams() -> Vec<TeamMembershipSummary> {
        vec![TeamMembershipSummary {
            team_id: TeamId::new("team-1").unwrap(),
            team_name: "Finance".to_string(),
            role_id: Some(RoleId::new("role-1").unwrap()),
            role_name: Some("Analyst".to_string()),
            permissions: vec!["read_expense".to_string()],
        }]
    }

    fn create_codec() -> JwtTokenCodec {
        JwtTokenCodec::new(TokenConfig::new("test-secret-key-12345", 7))
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = create_codec();
        let claims = SessionClaims::new(&test_user(), test_teams(), 7);

        let token = codec.issue(&claims).unwrap();
        assert!(!token.is_empty());

        let verified = codec.verify(&token).unwrap();
        assert_eq!(verified.sub, "user-1");
        assert_eq!(verified.email, "alice@example.com");
        assert_eq!(verified.account_type, AccountType::Business);
        assert_eq!(
            verified.business_id.as_ref().map(|b| b.as_str()),
            Some("biz-1")
        );
        assert_eq!(verified.teams, test_teams());
        assert_eq!(verified.exp - verified.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_tampered_signature_is_invalid_not_expired() {
        let codec = create_codec();
        let claims = SessionClaims::new(&test_user(), Vec::new(), 7);
        let token = codec.issue(&claims).unwrap();

        // Flip the last character of the signature segment
        let mut tampered: Vec<char> = token.chars().collect();
        let last = *tampered.last().unwrap();
        *tampered.last_mut().unwrap() = if last == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        match codec.verify(&tampered) {
            Err(TokenError::Invalid(_)) => {}
            other => panic!("expected Invalid, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let codec = create_codec();
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let codec1 = JwtTokenCodec::new(TokenConfig::new("secret-1", 7));
        let codec2 = JwtTokenCodec::new(TokenConfig::new("secret-2", 7));

        let token = codec1
            .issue(&SessionClaims::new(&test_user(), Vec::new(), 7))
            .unwrap();

        assert!(matches!(codec2.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let codec = create_codec();

        let past = Utc::now() - Duration::hours(2);
        let claims = SessionClaims {
            sub: "user-1".to_string(),
            email: "alice@example.com".to_string(),
            account_type: AccountType::Business,
            business_id: None,
            teams: Vec::new(),
            iat: (past - Duration::days(7)).timestamp(),
            exp: past.timestamp(),
        };

        let token = codec.issue(&claims).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_claims_into_actor() {
        let claims = SessionClaims::new(&test_user(), test_teams(), 7);
        let actor = claims.into_actor().unwrap();

        assert_eq!(actor.user_id.as_str(), "user-1");
        assert_eq!(actor.teams.len(), 1);
        assert_eq!(actor.teams[0].team_name, "Finance");
    }

    #[test]
    fn test_bad_subject_claim_rejected() {
        let mut claims = SessionClaims::new(&test_user(), Vec::new(), 7);
        claims.sub = "has spaces".to_string();

        assert!(matches!(claims.into_actor(), Err(TokenError::Invalid(_))));
    }
}

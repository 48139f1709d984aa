//! Domain layer - entities, repository traits and core errors

pub mod auth;
pub mod business;
pub mod error;
pub mod id;
pub mod membership;
pub mod role;
pub mod team;
pub mod user;

pub use auth::{AccountType, ActorContext, TeamMembershipSummary};
pub use business::{Business, BusinessRepository};
pub use error::DomainError;
pub use id::{BusinessId, IdError, MemberId, RoleId, TeamId, UserId};
pub use membership::{MembershipRepository, TeamMember};
pub use role::{Role, RoleRepository};
pub use team::{Team, TeamRepository};
pub use user::{User, UserRepository};

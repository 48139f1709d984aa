//! Actor identity types

mod actor;

pub use actor::{AccountType, ActorContext, TeamMembershipSummary};

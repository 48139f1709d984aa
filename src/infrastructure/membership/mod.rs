//! Team membership: coordinator service and storage

pub mod postgres_repository;
pub mod service;

pub use postgres_repository::PostgresMembershipRepository;
pub use service::{
    AddMemberRequest, MemberAdded, MemberRemoved, MembershipError, MembershipService, RemovedBy,
};

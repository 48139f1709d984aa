//! Team membership domain

mod entity;
mod repository;

pub use entity::TeamMember;
pub use repository::MembershipRepository;

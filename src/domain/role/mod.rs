//! Role domain

mod entity;
mod repository;

pub use entity::Role;
pub use repository::RoleRepository;

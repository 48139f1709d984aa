//! Business tenant domain

mod entity;
mod repository;

pub use entity::Business;
pub use repository::BusinessRepository;

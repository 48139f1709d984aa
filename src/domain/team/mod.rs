//! Team domain

mod entity;
mod repository;
mod validation;

pub use entity::Team;
pub use repository::TeamRepository;
pub use validation::{validate_team_name, TeamValidationError};

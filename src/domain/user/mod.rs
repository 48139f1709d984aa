//! User domain

mod entity;
mod repository;
mod validation;

pub use entity::User;
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_password, validate_user_name, UserValidationError,
};

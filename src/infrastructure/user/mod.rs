//! User account services: registration, authentication, profile updates

pub mod password;
pub mod postgres_repository;
pub mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use service::{RegisterUserRequest, UpdateProfileRequest, UserService};

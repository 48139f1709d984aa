//! Team storage

pub mod postgres_repository;

pub use postgres_repository::PostgresTeamRepository;

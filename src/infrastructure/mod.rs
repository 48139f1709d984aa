//! Infrastructure layer - storage, session tokens, services

pub mod auth;
pub mod business;
pub mod logging;
pub mod membership;
pub mod memory;
pub mod policy;
pub mod role;
pub mod storage;
pub mod team;
pub mod user;

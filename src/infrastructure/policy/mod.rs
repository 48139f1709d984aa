//! Access policy engine

mod engine;

pub use engine::{AccessPolicy, TeamAccess};

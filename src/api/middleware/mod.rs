//! Request middleware

pub mod session;

pub use session::{session_cookie, CurrentActor, SESSION_COOKIE};

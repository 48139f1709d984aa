//! Session token infrastructure

mod jwt;

pub use jwt::{JwtTokenCodec, SessionClaims, TokenCodec, TokenConfig, TokenError};

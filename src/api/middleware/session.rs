//! Session resolution from the `session_token` cookie

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::ActorContext;
use crate::infrastructure::auth::TokenError;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session_token";

/// Extractor that requires a valid session cookie.
///
/// The absent-credential case and the expired-credential case carry
/// distinct codes so clients can prompt for sign-in versus re-sign-in.
/// Claims map straight into the actor; no store access happens here.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub ActorContext);

impl FromRequestParts<AppState> for CurrentActor {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_cookie(&parts.headers).ok_or_else(|| {
            ApiError::unauthorized("Authentication required", "NO_SESSION")
        })?;

        debug!("Verifying session token");

        let claims = state.tokens.verify(&token).map_err(|e| match e {
            TokenError::Expired => ApiError::unauthorized("Session expired", "SESSION_EXPIRED"),
            TokenError::Invalid(_) => {
                ApiError::unauthorized("Invalid session", "INVALID_SESSION")
            }
        })?;

        let actor = claims
            .into_actor()
            .map_err(|_| ApiError::unauthorized("Invalid session", "INVALID_SESSION"))?;

        Ok(CurrentActor(actor))
    }
}

/// Pull the session token out of the `Cookie` header, if present
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in raw.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=') {
            if name == SESSION_COOKIE && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extracts_session_cookie() {
        let headers = headers_with_cookie("session_token=abc.def.ghi");
        assert_eq!(session_cookie(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_extracts_among_other_cookies() {
        let headers =
            headers_with_cookie("theme=dark; session_token=tok-1; locale=en");
        assert_eq!(session_cookie(&headers), Some("tok-1".to_string()));
    }

    #[test]
    fn test_missing_cookie_header() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn test_other_cookies_only() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_cookie(&headers), None);
    }

    #[test]
    fn test_empty_value_is_absent() {
        let headers = headers_with_cookie("session_token=");
        assert_eq!(session_cookie(&headers), None);
    }
}

//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;
use crate::infrastructure::membership::MembershipError;

/// Wire shape of every error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Short human-readable category, e.g. "Unauthorized"
    pub error: String,
    /// Human-readable detail
    pub message: String,
    /// Stable machine-readable code, e.g. "SESSION_EXPIRED"
    pub code: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ApiErrorBody,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        error: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            status,
            body: ApiErrorBody {
                error: error.into(),
                message: message.into(),
                code: code.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", message, code)
    }

    pub fn forbidden(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden", message, code)
    }

    pub fn bad_request(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", message, code)
    }

    pub fn not_found(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", message, code)
    }

    pub fn conflict(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict", message, code)
    }

    /// Generic 500 with no internal detail in the body
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "An internal error occurred",
            "INTERNAL_ERROR",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Unauthenticated { message } => {
                Self::unauthorized(message, "UNAUTHORIZED")
            }
            DomainError::SessionExpired => {
                Self::unauthorized("Session expired", "SESSION_EXPIRED")
            }
            DomainError::Forbidden { message } => Self::forbidden(message, "FORBIDDEN"),
            DomainError::Validation { message } => {
                Self::bad_request(message, "VALIDATION_ERROR")
            }
            DomainError::InvalidId { message } => Self::bad_request(message, "INVALID_ID"),
            DomainError::NotFound { message } => Self::not_found(message, "NOT_FOUND"),
            DomainError::Conflict { message } => Self::conflict(message, "CONFLICT"),
            DomainError::Storage { .. } | DomainError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::internal()
            }
        }
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        match err {
            MembershipError::ManageDenied => {
                Self::forbidden(err.to_string(), "TEAM_MANAGE_DENIED")
            }
            MembershipError::UserNotInBusiness => {
                Self::bad_request(err.to_string(), "USER_NOT_IN_BUSINESS")
            }
            MembershipError::RoleNotInTeam => {
                Self::bad_request(err.to_string(), "ROLE_NOT_IN_TEAM")
            }
            MembershipError::AlreadyMember => {
                Self::conflict(err.to_string(), "USER_ALREADY_IN_TEAM")
            }
            MembershipError::CannotRemoveAdmin => {
                Self::bad_request(err.to_string(), "CANNOT_REMOVE_ADMIN")
            }
            MembershipError::NotAMember => Self::not_found(err.to_string(), "USER_NOT_IN_TEAM"),
            MembershipError::Domain(inner) => inner.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.code, self.body.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::unauthorized("Authentication required", "NO_SESSION");
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.code, "NO_SESSION");
        assert_eq!(err.body.error, "Unauthorized");
    }

    #[test]
    fn test_domain_error_conversion() {
        let api_err: ApiError = DomainError::SessionExpired.into();
        assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api_err.body.code, "SESSION_EXPIRED");

        let api_err: ApiError = DomainError::conflict("duplicate").into();
        assert_eq!(api_err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_internal_detail_not_leaked() {
        let api_err: ApiError = DomainError::storage("connection refused to 10.0.0.5").into();
        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_err.body.message.contains("10.0.0.5"));
        assert_eq!(api_err.body.code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_membership_error_mapping() {
        let cases = [
            (
                MembershipError::ManageDenied,
                StatusCode::FORBIDDEN,
                "TEAM_MANAGE_DENIED",
            ),
            (
                MembershipError::UserNotInBusiness,
                StatusCode::BAD_REQUEST,
                "USER_NOT_IN_BUSINESS",
            ),
            (
                MembershipError::RoleNotInTeam,
                StatusCode::BAD_REQUEST,
                "ROLE_NOT_IN_TEAM",
            ),
            (
                MembershipError::AlreadyMember,
                StatusCode::CONFLICT,
                "USER_ALREADY_IN_TEAM",
            ),
            (
                MembershipError::CannotRemoveAdmin,
                StatusCode::BAD_REQUEST,
                "CANNOT_REMOVE_ADMIN",
            ),
            (
                MembershipError::NotAMember,
                StatusCode::NOT_FOUND,
                "USER_NOT_IN_TEAM",
            ),
        ];

        for (err, status, code) in cases {
            let api_err: ApiError = err.into();
            assert_eq!(api_err.status, status);
            assert_eq!(api_err.body.code, code);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Session expired", "SESSION_EXPIRED");
        let json = serde_json::to_string(&err.body).unwrap();

        assert!(json.contains("\"code\":\"SESSION_EXPIRED\""));
        assert!(json.contains("\"error\":\"Unauthorized\""));
    }
}

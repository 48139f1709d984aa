//! Authentication endpoints: sign-up, sign-in, sign-out, session echo

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::{CurrentActor, SESSION_COOKIE};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::{AccountType, ActorContext, TeamMembershipSummary};
use crate::domain::id::UserId;
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::auth::SessionClaims;
use crate::infrastructure::user::RegisterUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/sign-out", post(sign_out))
        .route("/session", get(session))
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    #[serde(default)]
    pub account_type: AccountType,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// User fields safe to expose
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserResponse {
    pub(crate) fn from_user(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().to_string(),
            name: user.name().map(String::from),
            account_type: user.account_type(),
            business_id: user.business_id().map(|b| b.as_str().to_string()),
            phone: user.phone().map(String::from),
            created_at: user.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct SignOutResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
    pub teams: Vec<TeamMembershipSummary>,
}

/// Register a new account
///
/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<SignUpRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            email: request.email,
            password: request.password,
            name: request.name,
            account_type: request.account_type,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from_user(&user))).into_response())
}

/// Sign in with email and password
///
/// POST /auth/sign-in
///
/// Issues a session token in an HTTP-only cookie. Unknown email and wrong
/// password produce the same response.
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| {
            ApiError::unauthorized("Invalid email or password", "INVALID_CREDENTIALS")
        })?;

    let teams = team_snapshot(&state, user.id()).await?;

    let ttl_days = state.tokens.ttl_days();
    let claims = SessionClaims::new(&user, teams, ttl_days);
    let token = state.tokens.issue(&claims)?;

    info!(user_id = %user.id(), "User signed in");

    let expires_at = Utc::now() + Duration::days(ttl_days as i64);
    let body = Json(SignInResponse {
        user: UserResponse::from_user(&user),
        expires_at,
    });

    let mut response = body.into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, session_cookie_header(&token, ttl_days)?);

    Ok(response)
}

/// Sign out by clearing the session cookie
///
/// POST /auth/sign-out
///
/// Always succeeds, with or without a valid session.
pub async fn sign_out() -> Result<Response, ApiError> {
    let mut response = Json(SignOutResponse {
        message: "Signed out".to_string(),
    })
    .into_response();

    response
        .headers_mut()
        .insert(header::SET_COOKIE, clear_cookie_header()?);

    Ok(response)
}

/// Echo the resolved session
///
/// GET /auth/session
pub async fn session(CurrentActor(actor): CurrentActor) -> Json<SessionResponse> {
    let ActorContext {
        user_id,
        email,
        account_type,
        business_id,
        teams,
    } = actor;

    Json(SessionResponse {
        user_id: user_id.as_str().to_string(),
        email,
        account_type,
        business_id: business_id.map(|b| b.as_str().to_string()),
        teams,
    })
}

/// Build the team/role snapshot embedded in a fresh token
async fn team_snapshot(
    state: &AppState,
    user_id: &UserId,
) -> Result<Vec<TeamMembershipSummary>, DomainError> {
    let memberships = state.members.list_for_user(user_id).await?;
    let mut summaries = Vec::with_capacity(memberships.len());

    for member in memberships {
        let Some(team) = state.teams.get(member.team_id()).await? else {
            continue;
        };
        if !team.is_active() {
            continue;
        }

        let role = match member.role_id() {
            Some(role_id) => state.roles.get(role_id).await?,
            None => None,
        };

        summaries.push(TeamMembershipSummary {
            team_id: member.team_id().clone(),
            team_name: team.name().to_string(),
            role_id: member.role_id().cloned(),
            role_name: role.as_ref().map(|r| r.name().to_string()),
            permissions: role.map(|r| r.permissions().to_vec()).unwrap_or_default(),
        });
    }

    Ok(summaries)
}

fn session_cookie_header(token: &str, ttl_days: u64) -> Result<HeaderValue, ApiError> {
    let value = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        ttl_days * 86_400
    );

    HeaderValue::from_str(&value).map_err(|_| ApiError::internal())
}

fn clear_cookie_header() -> Result<HeaderValue, ApiError> {
    let value = format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE);

    HeaderValue::from_str(&value).map_err(|_| ApiError::internal())
}

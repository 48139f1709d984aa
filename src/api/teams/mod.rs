//! Team member management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, post},
    Router,
};
use serde::Deserialize;

use crate::api::middleware::CurrentActor;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::id::{RoleId, TeamId, UserId};
use crate::infrastructure::membership::AddMemberRequest;

/// Create the teams router
pub fn create_teams_router() -> Router<AppState> {
    Router::new()
        .route("/{team_id}/members", post(add_member))
        .route("/{team_id}/members/{user_id}", delete(remove_member))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberBody {
    pub user_id: String,
    pub role_id: String,
}

/// Add a user to a team
///
/// POST /teams/{team_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(team_id): Path<String>,
    Json(body): Json<AddMemberBody>,
) -> Result<Response, ApiError> {
    let request = AddMemberRequest {
        team_id: parse_id::<TeamId>(&team_id, "team ID")?,
        user_id: parse_id::<UserId>(&body.user_id, "user ID")?,
        role_id: parse_id::<RoleId>(&body.role_id, "role ID")?,
    };

    let added = state.membership_service.add_member(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(added)).into_response())
}

/// Remove a user from a team
///
/// DELETE /teams/{team_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let team_id = parse_id::<TeamId>(&team_id, "team ID")?;
    let user_id = parse_id::<UserId>(&user_id, "user ID")?;

    let removed = state
        .membership_service
        .remove_member(&team_id, &user_id, &actor)
        .await?;

    Ok(Json(removed).into_response())
}

fn parse_id<T>(raw: &str, label: &str) -> Result<T, ApiError>
where
    T: TryFrom<String>,
    T::Error: std::fmt::Display,
{
    T::try_from(raw.to_string())
        .map_err(|e| ApiError::bad_request(format!("Invalid {}: {}", label, e), "INVALID_ID"))
}

//! User profile endpoints

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use serde::Deserialize;

use crate::api::auth::UserResponse;
use crate::api::middleware::CurrentActor;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::UpdateProfileRequest;

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", put(update_profile))
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Get the signed-in user's profile
///
/// GET /users/profile
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get(&actor.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found", "USER_NOT_FOUND"))?;

    Ok(Json(UserResponse::from_user(&user)))
}

/// Update name and phone on the signed-in user's profile
///
/// PUT /users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .update_profile(
            &actor.user_id,
            UpdateProfileRequest {
                name: request.name,
                phone: request.phone,
            },
        )
        .await?;

    Ok(Json(UserResponse::from_user(&user)))
}

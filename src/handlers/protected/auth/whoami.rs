use axum::extract::State;

use crate::database::models::Profile;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/auth/whoami - Profile of the signed-in caller, any role
pub async fn get(State(state): State<AppState>, user: AuthUser) -> ApiResult<Profile> {
    let profile = state.store.profile(user.user_id).await?.ok_or_else(|| {
        tracing::warn!(user_id = %user.user_id, "Session without a profile");
        ApiError::not_found("Profile not found")
    })?;

    Ok(ApiResponse::success(profile))
}

use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::handlers::protected::utils::parse_id;
use crate::middleware::{ApiResponse, ApiResult, RequireAdmin};
use crate::state::AppState;

/// DELETE /api/venues/:id/delete - Remove a venue by profile id (admin)
///
/// No existence check: deleting an unknown venue succeeds.
pub async fn delete(State(state): State<AppState>, gate: RequireAdmin, Path(id): Path<String>) -> ApiResult<()> {
    let profile_id = parse_id(&id).ok_or_else(|| ApiError::bad_request(format!("Invalid venue id: {}", id)))?;

    state.store.delete_venue(profile_id).await?;

    tracing::info!(%profile_id, admin_id = %gate.user.user_id, "Venue deleted");
    Ok(ApiResponse::ok())
}

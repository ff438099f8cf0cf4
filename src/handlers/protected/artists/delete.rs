use axum::extract::{Path, State};

use crate::error::ApiError;
use crate::handlers::protected::utils::parse_id;
use crate::middleware::{ApiResponse, ApiResult, RequireAdmin};
use crate::state::AppState;

/// DELETE /api/artists/:id/delete - Remove an artist (admin)
///
/// Resolves the artist row from the profile id and deletes it by its own
/// id. Dependent rows go through the database's cascade rules.
pub async fn delete(State(state): State<AppState>, gate: RequireAdmin, Path(id): Path<String>) -> ApiResult<()> {
    let profile_id = parse_id(&id).ok_or_else(|| ApiError::not_found("Artist not found"))?;

    let artist = state
        .store
        .artist_by_profile(profile_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Artist not found"))?;

    state.store.delete_artist(artist.id).await?;

    tracing::info!(artist_id = %artist.id, %profile_id, admin_id = %gate.user.user_id, "Artist deleted");
    Ok(ApiResponse::ok())
}

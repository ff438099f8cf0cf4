use axum::extract::{Path, State};

use crate::database::models::ArtistUpdate;
use crate::error::ApiError;
use crate::handlers::protected::utils::{parse_id, string_field, JsonObject};
use crate::middleware::{ApiResponse, ApiResult, RequireAdmin};
use crate::state::AppState;

/// PUT /api/artists/:id/edit - Overwrite an artist's listing fields (admin)
///
/// `:id` is the artist's profile id. Every editable column is written;
/// empty or missing values store NULL.
pub async fn put(
    State(state): State<AppState>,
    gate: RequireAdmin,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<()> {
    let profile_id = parse_id(&id).ok_or_else(|| ApiError::not_found("Artist not found"))?;

    if state.store.artist_by_profile(profile_id).await?.is_none() {
        tracing::debug!(%profile_id, "Artist edit for unknown profile");
        return Err(ApiError::not_found("Artist not found"));
    }

    let update = ArtistUpdate {
        stage_name: string_field(&body, "stage_name"),
        bio_short: string_field(&body, "bio_short"),
        bio_long: string_field(&body, "bio_long"),
        primary_genre: string_field(&body, "primary_genre"),
    };

    state.store.update_artist(profile_id, &update).await?;

    tracing::info!(%profile_id, admin_id = %gate.user.user_id, "Artist updated");
    Ok(ApiResponse::ok())
}

use axum::extract::State;
use serde_json::Value;

use crate::database::models::ProfileDataColumn;
use crate::handlers::protected::utils::{profile_patch, JsonObject};
use crate::middleware::{ApiResponse, ApiResult, RequireArtist};
use crate::state::AppState;

/// Artist identity fields kept in `profiles.artist_data`.
pub const IDENTITY_FIELDS: &[&str] = &[
    "stage_name",
    "formation_type",
    "member_count",
    "years_active",
    "origin_city",
    "primary_genre",
    "secondary_genres",
    "bio_short",
    "bio_long",
];

/// PUT /api/profile/identity - Merge identity fields into the caller's
/// own `artist_data` and return the stored result.
pub async fn put(State(state): State<AppState>, gate: RequireArtist, JsonObject(body): JsonObject) -> ApiResult<Value> {
    let patch = profile_patch(IDENTITY_FIELDS, &body);

    let merged = state
        .store
        .merge_profile_data(gate.user.user_id, ProfileDataColumn::ArtistData, &patch)
        .await?;

    tracing::info!(user_id = %gate.user.user_id, fields = patch.patch.len(), "Artist identity updated");
    Ok(ApiResponse::success(Value::Object(merged)))
}

use axum::extract::{Path, State};

use crate::database::models::VenueUpdate;
use crate::error::ApiError;
use crate::handlers::protected::utils::{int_field, parse_id, string_field, JsonObject};
use crate::middleware::{ApiResponse, ApiResult, RequireAdmin};
use crate::state::AppState;

/// PUT /api/venues/:id/edit - Overwrite a venue's listing fields (admin)
pub async fn put(
    State(state): State<AppState>,
    gate: RequireAdmin,
    Path(id): Path<String>,
    JsonObject(body): JsonObject,
) -> ApiResult<()> {
    let venue_name = string_field(&body, "venue_name").ok_or_else(|| ApiError::bad_request("Venue name is required"))?;
    let capacity_min = int_field(&body, "capacity_min")?;
    let capacity_max = int_field(&body, "capacity_max")?;

    let profile_id = parse_id(&id).ok_or_else(|| ApiError::not_found("Venue not found"))?;
    if state.store.venue_by_profile(profile_id).await?.is_none() {
        return Err(ApiError::not_found("Venue not found"));
    }

    let update = VenueUpdate {
        venue_name,
        capacity_min,
        capacity_max,
    };
    state.store.update_venue(profile_id, &update).await?;

    tracing::info!(%profile_id, admin_id = %gate.user.user_id, "Venue updated");
    Ok(ApiResponse::ok())
}

use axum::extract::State;
use serde_json::Value;

use crate::database::models::ProfileDataColumn;
use crate::handlers::protected::utils::{profile_patch, JsonObject};
use crate::middleware::{ApiResponse, ApiResult, RequireVenue};
use crate::state::AppState;

/// Venue technical rider fields kept in `profiles.venue_data`.
pub const TECHNICAL_FIELDS: &[&str] = &[
    "stage_width",
    "stage_depth",
    "ceiling_height",
    "pa_system",
    "lighting_rig",
    "backline",
    "power_supply",
    "load_in_access",
    "green_room",
    "parking",
];

/// PUT /api/profile/technical - Merge technical fields into the caller's
/// own `venue_data` and return the stored result.
pub async fn put(State(state): State<AppState>, gate: RequireVenue, JsonObject(body): JsonObject) -> ApiResult<Value> {
    let patch = profile_patch(TECHNICAL_FIELDS, &body);

    let merged = state
        .store
        .merge_profile_data(gate.user.user_id, ProfileDataColumn::VenueData, &patch)
        .await?;

    tracing::info!(user_id = %gate.user.user_id, fields = patch.patch.len(), "Venue technical details updated");
    Ok(ApiResponse::success(Value::Object(merged)))
}

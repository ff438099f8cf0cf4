use axum::extract::Path;

use crate::error::ApiError;
use crate::middleware::RequireVenue;

/// POST /api/artists/:id/contact - Venue-to-artist contact request
///
/// Not built yet. Venues get a 503 with `placeholder: true` so clients can
/// tell it apart from an outage.
pub async fn post(gate: RequireVenue, Path(id): Path<String>) -> Result<(), ApiError> {
    tracing::info!(venue_id = %gate.user.user_id, artist = %id, "Artist contact requested");
    Err(ApiError::placeholder("Contacting artists is not available yet"))
}

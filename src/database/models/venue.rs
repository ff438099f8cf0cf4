use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub venue_name: String,
    pub capacity_min: Option<i32>,
    pub capacity_max: Option<i32>,
}

/// Full overwrite of the admin-editable venue columns. `venue_name` is
/// validated non-empty before this is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueUpdate {
    pub venue_name: String,
    pub capacity_min: Option<i32>,
    pub capacity_max: Option<i32>,
}

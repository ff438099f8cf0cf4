use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub stage_name: Option<String>,
    pub bio_short: Option<String>,
    pub bio_long: Option<String>,
    pub primary_genre: Option<String>,
}

/// Full overwrite of the admin-editable artist columns. `None` writes NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistUpdate {
    pub stage_name: Option<String>,
    pub bio_short: Option<String>,
    pub bio_long: Option<String>,
    pub primary_genre: Option<String>,
}

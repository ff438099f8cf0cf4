use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use super::models::{Artist, ArtistUpdate, Profile, ProfileDataColumn, ProfileDataPatch, Role, Venue, VenueUpdate};

/// Errors surfaced by a [`MarketplaceStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered and refused the request (constraint, type or
    /// permission failure). The message is safe to hand back to the caller.
    #[error("{0}")]
    Backend(String),

    /// The store could not be reached or returned something unexpected.
    #[error("unexpected store error: {0}")]
    Unexpected(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::Backend(db_err.message().to_string()),
            other => StoreError::Unexpected(other.to_string()),
        }
    }
}

/// Access to the `profiles`, `artists` and `venues` tables.
///
/// Every method is a single round trip. Rows are created by the
/// registration flow; this service only reads, updates and deletes them.
#[async_trait]
pub trait MarketplaceStore: Send + Sync {
    async fn profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Role of a profile. Missing profiles and unknown role strings are `None`.
    async fn profile_role(&self, id: Uuid) -> Result<Option<Role>, StoreError>;

    async fn artist_by_profile(&self, profile_id: Uuid) -> Result<Option<Artist>, StoreError>;

    async fn update_artist(&self, profile_id: Uuid, update: &ArtistUpdate) -> Result<(), StoreError>;

    /// Delete by the artist's own id. Dependent rows are removed by the
    /// database's cascade rules.
    async fn delete_artist(&self, artist_id: Uuid) -> Result<(), StoreError>;

    async fn venue_by_profile(&self, profile_id: Uuid) -> Result<Option<Venue>, StoreError>;

    async fn update_venue(&self, profile_id: Uuid, update: &VenueUpdate) -> Result<(), StoreError>;

    async fn delete_venue(&self, profile_id: Uuid) -> Result<(), StoreError>;

    /// Atomically merge `patch` into a profile JSON column and return the
    /// stored result. Fails with `Backend` when the profile does not exist.
    async fn merge_profile_data(
        &self,
        id: Uuid,
        column: ProfileDataColumn,
        patch: &ProfileDataPatch,
    ) -> Result<Map<String, Value>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

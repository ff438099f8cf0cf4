use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool, Row};
use uuid::Uuid;

use super::models::{Artist, ArtistUpdate, Profile, ProfileDataColumn, ProfileDataPatch, Role, Venue, VenueUpdate};
use super::store::{MarketplaceStore, StoreError};

// `role` may be a postgres enum; read it as text so either column type decodes.
const PROFILE_SQL: &str = "SELECT id, role::text AS role, artist_data, venue_data FROM profiles WHERE id = $1";
const PROFILE_ROLE_SQL: &str = "SELECT role::text FROM profiles WHERE id = $1";

/// [`MarketplaceStore`] backed by the hosted PostgreSQL database.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn merge_sql(column: ProfileDataColumn) -> String {
        // Column names come from a closed enum, never from input.
        // Anything stored that is not an object merges as `{}`.
        let col = column.column_name();
        format!(
            "UPDATE profiles \
             SET \"{col}\" = $2::jsonb \
                 || CASE WHEN jsonb_typeof(\"{col}\") = 'object' THEN \"{col}\" ELSE '{{}}'::jsonb END \
                 || $3::jsonb \
             WHERE id = $1 \
             RETURNING \"{col}\" AS merged"
        )
    }
}

#[async_trait]
impl MarketplaceStore for PgStore {
    async fn profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        let profile = sqlx::query_as::<_, Profile>(PROFILE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    async fn profile_role(&self, id: Uuid) -> Result<Option<Role>, StoreError> {
        let role: Option<Option<String>> = sqlx::query_scalar(PROFILE_ROLE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role.flatten().as_deref().and_then(Role::parse))
    }

    async fn artist_by_profile(&self, profile_id: Uuid) -> Result<Option<Artist>, StoreError> {
        let artist = sqlx::query_as::<_, Artist>(
            "SELECT id, profile_id, stage_name, bio_short, bio_long, primary_genre
             FROM artists
             WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(artist)
    }

    async fn update_artist(&self, profile_id: Uuid, update: &ArtistUpdate) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE artists
             SET stage_name = $2, bio_short = $3, bio_long = $4, primary_genre = $5
             WHERE profile_id = $1",
        )
        .bind(profile_id)
        .bind(&update.stage_name)
        .bind(&update.bio_short)
        .bind(&update.bio_long)
        .bind(&update.primary_genre)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_artist(&self, artist_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(artist_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn venue_by_profile(&self, profile_id: Uuid) -> Result<Option<Venue>, StoreError> {
        let venue = sqlx::query_as::<_, Venue>(
            "SELECT id, profile_id, venue_name, capacity_min, capacity_max
             FROM venues
             WHERE profile_id = $1",
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    async fn update_venue(&self, profile_id: Uuid, update: &VenueUpdate) -> Result<(), StoreError> {
        sqlx::query(
            "UPDATE venues
             SET venue_name = $2, capacity_min = $3, capacity_max = $4
             WHERE profile_id = $1",
        )
        .bind(profile_id)
        .bind(&update.venue_name)
        .bind(update.capacity_min)
        .bind(update.capacity_max)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_venue(&self, profile_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM venues WHERE profile_id = $1")
            .bind(profile_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn merge_profile_data(
        &self,
        id: Uuid,
        column: ProfileDataColumn,
        patch: &ProfileDataPatch,
    ) -> Result<Map<String, Value>, StoreError> {
        let row = sqlx::query(&Self::merge_sql(column))
            .bind(id)
            .bind(Json(&patch.defaults))
            .bind(Json(&patch.patch))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::Backend("Profile not found".to_string()))?;

        match row.try_get::<Value, _>("merged")? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Unexpected(format!(
                "{} is not an object: {}",
                column.column_name(),
                other
            ))),
        }
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

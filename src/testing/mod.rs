//! In-memory collaborators and request helpers for router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::{issue_token, Claims};
use crate::backend::{BackendError, ObjectStorage, Session, SessionExchange};
use crate::config::AppConfig;
use crate::database::models::{Artist, ArtistUpdate, Profile, ProfileDataColumn, ProfileDataPatch, Role, Venue, VenueUpdate};
use crate::database::{MarketplaceStore, StoreError};
use crate::state::AppState;

pub const TEST_JWT_SECRET: &str = "flow-stage-test-secret";

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    artists: HashMap<Uuid, Artist>,
    venues: HashMap<Uuid, Venue>,
    writes: Vec<String>,
    reject_writes: Option<String>,
}

/// [`MarketplaceStore`] over hash maps. Every write is recorded so tests can
/// assert that rejected requests never reach the store.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn add_profile(&self, role: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().profiles.insert(
            id,
            Profile {
                id,
                role: role.map(str::to_string),
                artist_data: None,
                venue_data: None,
            },
        );
        id
    }

    pub fn add_artist(&self, profile_id: Uuid, stage_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().artists.insert(
            id,
            Artist {
                id,
                profile_id,
                stage_name: Some(stage_name.to_string()),
                bio_short: Some("Short bio".to_string()),
                bio_long: Some("Long bio".to_string()),
                primary_genre: Some("jazz".to_string()),
            },
        );
        id
    }

    pub fn add_venue(&self, profile_id: Uuid, venue_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.lock().unwrap().venues.insert(
            id,
            Venue {
                id,
                profile_id,
                venue_name: venue_name.to_string(),
                capacity_min: Some(50),
                capacity_max: Some(300),
            },
        );
        id
    }

    /// Make every subsequent write fail with a backend error.
    pub fn reject_writes(&self, message: &str) {
        self.tables.lock().unwrap().reject_writes = Some(message.to_string());
    }

    pub fn writes(&self) -> Vec<String> {
        self.tables.lock().unwrap().writes.clone()
    }

    pub fn artist(&self, artist_id: Uuid) -> Option<Artist> {
        self.tables.lock().unwrap().artists.get(&artist_id).cloned()
    }

    pub fn venue(&self, venue_id: Uuid) -> Option<Venue> {
        self.tables.lock().unwrap().venues.get(&venue_id).cloned()
    }

    pub fn stored_profile(&self, id: Uuid) -> Option<Profile> {
        self.tables.lock().unwrap().profiles.get(&id).cloned()
    }

    fn record_write(tables: &mut Tables, what: String) -> Result<(), StoreError> {
        if let Some(message) = &tables.reject_writes {
            return Err(StoreError::Backend(message.clone()));
        }
        tables.writes.push(what);
        Ok(())
    }
}

#[async_trait]
impl MarketplaceStore for MemoryStore {
    async fn profile(&self, id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.stored_profile(id))
    }

    async fn profile_role(&self, id: Uuid) -> Result<Option<Role>, StoreError> {
        Ok(self.stored_profile(id).and_then(|p| p.role()))
    }

    async fn artist_by_profile(&self, profile_id: Uuid) -> Result<Option<Artist>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.artists.values().find(|a| a.profile_id == profile_id).cloned())
    }

    async fn update_artist(&self, profile_id: Uuid, update: &ArtistUpdate) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        Self::record_write(&mut tables, format!("update_artist:{profile_id}"))?;
        for artist in tables.artists.values_mut().filter(|a| a.profile_id == profile_id) {
            artist.stage_name = update.stage_name.clone();
            artist.bio_short = update.bio_short.clone();
            artist.bio_long = update.bio_long.clone();
            artist.primary_genre = update.primary_genre.clone();
        }
        Ok(())
    }

    async fn delete_artist(&self, artist_id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        Self::record_write(&mut tables, format!("delete_artist:{artist_id}"))?;
        tables.artists.remove(&artist_id);
        Ok(())
    }

    async fn venue_by_profile(&self, profile_id: Uuid) -> Result<Option<Venue>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.venues.values().find(|v| v.profile_id == profile_id).cloned())
    }

    async fn update_venue(&self, profile_id: Uuid, update: &VenueUpdate) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        Self::record_write(&mut tables, format!("update_venue:{profile_id}"))?;
        for venue in tables.venues.values_mut().filter(|v| v.profile_id == profile_id) {
            venue.venue_name = update.venue_name.clone();
            venue.capacity_min = update.capacity_min;
            venue.capacity_max = update.capacity_max;
        }
        Ok(())
    }

    async fn delete_venue(&self, profile_id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        Self::record_write(&mut tables, format!("delete_venue:{profile_id}"))?;
        tables.venues.retain(|_, v| v.profile_id != profile_id);
        Ok(())
    }

    async fn merge_profile_data(
        &self,
        id: Uuid,
        column: ProfileDataColumn,
        patch: &ProfileDataPatch,
    ) -> Result<Map<String, Value>, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        Self::record_write(&mut tables, format!("merge_{}:{id}", column.column_name()))?;

        let profile = tables
            .profiles
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend("Profile not found".to_string()))?;
        let slot = match column {
            ProfileDataColumn::ArtistData => &mut profile.artist_data,
            ProfileDataColumn::VenueData => &mut profile.venue_data,
        };

        let merged = patch.apply(slot.as_ref());
        *slot = Some(Value::Object(merged.clone()));
        Ok(merged)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Object storage double that records every signing request.
#[derive(Default)]
pub struct FakeStorage {
    calls: Mutex<Vec<(String, String, u64)>>,
    fail: Mutex<bool>,
}

impl FakeStorage {
    pub fn fail_requests(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<(String, String, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn create_signed_url(&self, bucket: &str, path: &str, expires_in: u64) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((bucket.to_string(), path.to_string(), expires_in));

        if *self.fail.lock().unwrap() {
            return Err(BackendError::Status {
                status: 400,
                message: "Object not found".to_string(),
            });
        }

        Ok(format!("https://storage.test/{bucket}/{path}?token=signed&expires={expires_in}"))
    }
}

/// Auth service double: known codes map to sessions, anything else fails.
#[derive(Default)]
pub struct FakeSessions {
    codes: Mutex<HashMap<String, Session>>,
    verifiers: Mutex<Vec<Option<String>>>,
}

impl FakeSessions {
    pub fn accept_code(&self, code: &str, user_id: Uuid) {
        self.codes.lock().unwrap().insert(
            code.to_string(),
            Session {
                access_token: format!("access-{code}"),
                expires_in: 3600,
                user_id,
            },
        );
    }

    pub fn verifiers(&self) -> Vec<Option<String>> {
        self.verifiers.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionExchange for FakeSessions {
    async fn exchange_code(&self, code: &str, code_verifier: Option<&str>) -> Result<Session, BackendError> {
        self.verifiers.lock().unwrap().push(code_verifier.map(str::to_string));
        self.codes
            .lock()
            .unwrap()
            .get(code)
            .cloned()
            .ok_or(BackendError::Status {
                status: 400,
                message: "invalid flow state, no valid flow state found".to_string(),
            })
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config
}

/// Router wired to in-memory collaborators.
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<FakeStorage>,
    pub sessions: Arc<FakeSessions>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let storage = Arc::new(FakeStorage::default());
        let sessions = Arc::new(FakeSessions::default());
        let state = AppState::new(test_config(), store.clone(), storage.clone(), sessions.clone());

        Self {
            state,
            store,
            storage,
            sessions,
        }
    }

    pub fn router(&self) -> Router {
        crate::app(self.state.clone())
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        let claims = Claims::new(
            user_id,
            Some(format!("{}@flowstage.test", user_id.simple())),
            &self.state.config.auth.jwt_audience,
            chrono::Duration::hours(1),
        );
        issue_token(&claims, &self.state.config.auth).expect("test token")
    }

    /// Profile with `role` plus a token for it.
    pub fn login_as(&self, role: &str) -> (Uuid, String) {
        let id = self.store.add_profile(Some(role));
        (id, self.token_for(id))
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router().oneshot(request).await.expect("router is infallible")
    }

    /// Send a JSON request and decode the JSON response.
    pub async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };

        (status, value)
    }
}

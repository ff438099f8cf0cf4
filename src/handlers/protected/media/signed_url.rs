use axum::{extract::State, http::HeaderMap, Json};
use serde_json::{json, Value};

use crate::config::StorageConfig;
use crate::database::models::Role;
use crate::error::ApiError;
use crate::handlers::protected::utils::JsonObject;
use crate::middleware::authorize;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Video,
    Audio,
    Photo,
    Document,
}

impl MediaType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(MediaType::Video),
            "audio" => Some(MediaType::Audio),
            "photo" => Some(MediaType::Photo),
            "document" => Some(MediaType::Document),
            _ => None,
        }
    }

    /// Storage bucket holding this media type. Videos are external links
    /// and live in no bucket.
    pub fn bucket<'a>(&self, storage: &'a StorageConfig) -> Option<&'a str> {
        match self {
            MediaType::Video => None,
            MediaType::Audio => Some(storage.audio_bucket.as_str()),
            MediaType::Photo => Some(storage.photo_bucket.as_str()),
            MediaType::Document => Some(storage.document_bucket.as_str()),
        }
    }
}

/// POST /api/media/signed-url - Temporary read URL for a stored file
///
/// Videos are already public and come back unchanged without any auth.
/// Other types need the admin role and a signed URL from object storage;
/// if storage cannot sign, the answer is a 503 placeholder.
pub async fn post(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonObject(body): JsonObject,
) -> Result<Json<Value>, ApiError> {
    let kind = body.get("type").and_then(Value::as_str).filter(|s| !s.is_empty());
    let path = body.get("path").and_then(Value::as_str).filter(|s| !s.is_empty());
    let (Some(kind), Some(path)) = (kind, path) else {
        return Err(ApiError::bad_request("Missing type or path"));
    };

    let media_type = MediaType::parse(kind).ok_or_else(|| ApiError::bad_request("Invalid media type"))?;
    let Some(bucket) = media_type.bucket(&state.config.storage) else {
        return Ok(Json(json!({ "url": path })));
    };

    let user = authorize(&state, &headers, Role::Admin).await?;

    let expires_in = state.config.storage.signed_url_expiry_secs;
    match state.storage.create_signed_url(bucket, path, expires_in).await {
        Ok(url) => {
            tracing::debug!(user_id = %user.user_id, bucket, path, "Signed media URL issued");
            Ok(Json(json!({ "url": url })))
        }
        Err(e) => {
            tracing::error!(error = %e, bucket, path, "Failed to sign media URL");
            Err(ApiError::placeholder("Signed URL generation is not available"))
        }
    }
}

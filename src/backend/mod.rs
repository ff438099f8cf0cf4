//! Seams to the hosted backend: object storage and the auth service.
//! Both are consumed as black boxes through the traits below.

pub mod supabase;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use supabase::SupabaseClient;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend not configured: {0}")]
    NotConfigured(&'static str),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

/// Session returned by a successful authorization-code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub expires_in: i64,
    pub user_id: Uuid,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Time-limited read URL for `path` inside `bucket`.
    async fn create_signed_url(&self, bucket: &str, path: &str, expires_in: u64) -> Result<String, BackendError>;
}

#[async_trait]
pub trait SessionExchange: Send + Sync {
    async fn exchange_code(&self, code: &str, code_verifier: Option<&str>) -> Result<Session, BackendError>;
}

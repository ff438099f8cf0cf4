use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

use super::{BackendError, ObjectStorage, Session, SessionExchange};
use crate::config::BackendConfig;

/// REST client for the hosted auth and storage APIs.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base: Url,
    service_role_key: String,
}

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    #[serde(rename = "signedURL", alias = "signedUrl")]
    signed_url: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: i64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        if config.url.is_empty() {
            return Err(BackendError::NotConfigured("SUPABASE_URL"));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http,
            base: Url::parse(&config.url)?,
            service_role_key: config.service_role_key.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Decode("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `POST /storage/v1/object/sign/{bucket}/{path...}`
    fn sign_url(&self, bucket: &str, path: &str) -> Result<Url, BackendError> {
        let mut segments = vec!["storage", "v1", "object", "sign", bucket];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        self.endpoint(&segments)
    }

    fn storage_public_url(&self, signed_path: &str) -> Result<Url, BackendError> {
        // The API answers with a path relative to /storage/v1.
        let relative = signed_path.trim_start_matches('/');
        let mut base = self.endpoint(&["storage", "v1", ""])?;
        base.set_query(None);
        Ok(base.join(relative)?)
    }

    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let message = ["message", "error_description", "msg", "error"]
            .iter()
            .find_map(|k| body.get(*k).and_then(Value::as_str))
            .unwrap_or("no error message")
            .to_string();

        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn create_signed_url(&self, bucket: &str, path: &str, expires_in: u64) -> Result<String, BackendError> {
        if self.service_role_key.is_empty() {
            return Err(BackendError::NotConfigured("SUPABASE_SERVICE_ROLE_KEY"));
        }

        let response = self
            .http
            .post(self.sign_url(bucket, path)?)
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .json(&json!({ "expiresIn": expires_in }))
            .send()
            .await?;

        let signed: SignedUrlResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(self.storage_public_url(&signed.signed_url)?.to_string())
    }
}

#[async_trait]
impl SessionExchange for SupabaseClient {
    async fn exchange_code(&self, code: &str, code_verifier: Option<&str>) -> Result<Session, BackendError> {
        let mut url = self.endpoint(&["auth", "v1", "token"])?;
        url.query_pairs_mut().append_pair("grant_type", "pkce");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.service_role_key)
            .json(&json!({
                "auth_code": code,
                "code_verifier": code_verifier.unwrap_or_default(),
            }))
            .send()
            .await?;

        let token: TokenResponse = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(Session {
            access_token: token.access_token,
            expires_in: token.expires_in,
            user_id: token.user.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(&BackendConfig {
            url: url.to_string(),
            service_role_key: "service-key".to_string(),
            request_timeout: 5,
        })
        .unwrap()
    }

    #[test]
    fn builds_sign_endpoint_with_encoded_segments() {
        let url = client("https://proj.supabase.co").sign_url("artist-photos", "abc/press kit/01.jpg").unwrap();
        assert_eq!(
            url.as_str(),
            "https://proj.supabase.co/storage/v1/object/sign/artist-photos/abc/press%20kit/01.jpg"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = client("http://localhost:54321/").sign_url("artist-audio", "/demo.mp3").unwrap();
        assert_eq!(url.as_str(), "http://localhost:54321/storage/v1/object/sign/artist-audio/demo.mp3");
    }

    #[test]
    fn resolves_signed_path_against_storage_root() {
        let url = client("https://proj.supabase.co")
            .storage_public_url("/object/sign/artist-photos/a.jpg?token=t0k")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://proj.supabase.co/storage/v1/object/sign/artist-photos/a.jpg?token=t0k"
        );
    }

    #[test]
    fn requires_a_base_url() {
        let result = SupabaseClient::new(&BackendConfig {
            url: String::new(),
            service_role_key: String::new(),
            request_timeout: 5,
        });
        assert!(matches!(result, Err(BackendError::NotConfigured("SUPABASE_URL"))));
    }
}

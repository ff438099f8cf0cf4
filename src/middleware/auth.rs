use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::{validate_token, Claims};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller identity resolved from the session token.
///
/// Only proves who the caller is. Role checks go through
/// [`RequireRole`](super::rbac::RequireRole), which re-reads the profile.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { user_id: claims.sub }
    }
}

impl AuthUser {
    pub fn from_headers(headers: &HeaderMap, auth: &AuthConfig) -> Result<Self, ApiError> {
        let token = extract_token(headers, &auth.session_cookie).ok_or_else(|| {
            tracing::debug!("Request without session token");
            ApiError::unauthorized("Unauthorized")
        })?;

        let claims = validate_token(&token, auth)?;
        Ok(AuthUser::from(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        AuthUser::from_headers(&parts.headers, &state.config.auth)
    }
}

/// Bearer token from the Authorization header, falling back to the session
/// cookie written by the sign-in callback.
fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let token = value.strip_prefix("Bearer ")?.trim();
        return (!token.is_empty()).then(|| token.to_string());
    }

    read_cookie(headers, cookie_name)
}

pub(crate) fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;

/// Claims carried by a hosted-auth access token. `sub` is the profile id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(sub: Uuid, email: Option<String>, audience: &str, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub,
            aud: audience.to_string(),
            email,
            // Hosted-auth database role, not the marketplace role.
            role: Some("authenticated".to_string()),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Sign a session token. The hosted auth service does this in production;
/// the service only needs it for local tooling and tests.
pub fn issue_token(claims: &Claims, auth: &AuthConfig) -> Result<String, TokenError> {
    if auth.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = EncodingKey::from_secret(auth.jwt_secret.as_bytes());
    Ok(encode(&Header::default(), claims, &key)?)
}

/// Verify signature, expiry and audience of a session token.
pub fn validate_token(token: &str, auth: &AuthConfig) -> Result<Claims, TokenError> {
    if auth.jwt_secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let key = DecodingKey::from_secret(auth.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.set_audience(&[auth.jwt_audience.as_str()]);

    Ok(decode::<Claims>(token, &key, &validation)?.claims)
}

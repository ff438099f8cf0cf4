//! Role gate shared by every protected endpoint.
//!
//! Authenticates the caller, then reads `profiles.role` fresh on every
//! request and compares it with the role the endpoint requires. Nothing is
//! cached between requests.

use std::marker::PhantomData;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use super::auth::AuthUser;
use crate::database::models::Role;
use crate::error::ApiError;
use crate::state::AppState;

/// Marker naming the role a [`RequireRole`] extractor demands.
pub trait RequiredRole: Send + Sync + 'static {
    const ROLE: Role;
}

pub struct AdminRole;
pub struct ArtistRole;
pub struct VenueRole;

impl RequiredRole for AdminRole {
    const ROLE: Role = Role::Admin;
}

impl RequiredRole for ArtistRole {
    const ROLE: Role = Role::Artist;
}

impl RequiredRole for VenueRole {
    const ROLE: Role = Role::Venue;
}

/// Extractor that rejects with 401 when no identity resolves and 403 when
/// the caller's stored role differs from `R::ROLE`.
///
/// ```ignore
/// async fn admin_only(gate: RequireAdmin) -> Result<Json<Value>, ApiError> {
///     tracing::info!(user_id = %gate.user.user_id, "admin call");
///     ...
/// }
/// ```
pub struct RequireRole<R: RequiredRole> {
    pub user: AuthUser,
    _role: PhantomData<R>,
}

pub type RequireAdmin = RequireRole<AdminRole>;
pub type RequireArtist = RequireRole<ArtistRole>;
pub type RequireVenue = RequireRole<VenueRole>;

#[async_trait]
impl<R: RequiredRole> FromRequestParts<AppState> for RequireRole<R> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = authorize(state, &parts.headers, R::ROLE).await?;
        Ok(RequireRole {
            user,
            _role: PhantomData,
        })
    }
}

/// The gate as a plain function, for endpoints that only require a role
/// for some inputs.
pub async fn authorize(state: &AppState, headers: &HeaderMap, required: Role) -> Result<AuthUser, ApiError> {
    let user = AuthUser::from_headers(headers, &state.config.auth)?;

    let role = state.store.profile_role(user.user_id).await?;
    if role != Some(required) {
        tracing::warn!(
            user_id = %user.user_id,
            role = ?role,
            required = %required,
            "Role check failed"
        );
        return Err(ApiError::forbidden("Forbidden"));
    }

    Ok(user)
}

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::backend::Session;
use crate::config::{AppConfig, Environment};
use crate::database::models::Role;
use crate::middleware::auth::read_cookie;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// GET /auth/callback?code= - Finish sign-in and send the user to their
/// dashboard
///
/// Exchanges the authorization code for a session, stores the access token
/// in the session cookie and redirects by the profile's role. Any failure
/// lands on `/`.
pub async fn get(State(state): State<AppState>, headers: HeaderMap, Query(query): Query<CallbackQuery>) -> Response {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return found("/", None, &state.config);
    };

    let verifier = read_cookie(&headers, &state.config.auth.code_verifier_cookie);
    let session = match state.sessions.exchange_code(&code, verifier.as_deref()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = %e, "Authorization code exchange failed");
            return found("/", None, &state.config);
        }
    };

    let role = match state.store.profile_role(session.user_id).await {
        Ok(role) => role,
        Err(e) => {
            tracing::error!(error = %e, user_id = %session.user_id, "Could not read role after sign-in");
            None
        }
    };

    let destination = Role::dashboard_path(role);
    tracing::info!(user_id = %session.user_id, role = ?role, destination, "Signed in");
    found(destination, Some(&session), &state.config)
}

/// 302 to `location`, setting or clearing the auth cookies.
fn found(location: &'static str, session: Option<&Session>, config: &AppConfig) -> Response {
    let mut response = (StatusCode::FOUND, [(header::LOCATION, location)]).into_response();

    let secure = if config.environment == Environment::Development { "" } else { "; Secure" };
    let headers = response.headers_mut();

    // The verifier is single use.
    let clear_verifier = format!("{}=; Path=/; Max-Age=0{}", config.auth.code_verifier_cookie, secure);
    if let Ok(value) = HeaderValue::from_str(&clear_verifier) {
        headers.append(header::SET_COOKIE, value);
    }

    if let Some(session) = session {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}{}",
            config.auth.session_cookie, session.access_token, session.expires_in, secure
        );
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => tracing::error!(error = %e, "Session token is not a valid cookie value"),
        }
    }

    response
}

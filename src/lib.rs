pub mod auth;
pub mod backend;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

#[cfg(test)]
pub mod testing;

use std::any::Any;

use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ApiError;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security);

    let router = Router::new()
        // Public
        .merge(public_routes())
        // Role-gated API
        .merge(artist_routes())
        .merge(venue_routes())
        .merge(profile_routes())
        .merge(media_routes())
        .with_state(state)
        // Global middleware
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn public_routes() -> Router<AppState> {
    use handlers::protected::auth_whoami;
    use handlers::public;

    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/auth/callback", get(public::auth_callback))
        .route("/api/auth/whoami", get(auth_whoami))
}

fn artist_routes() -> Router<AppState> {
    use handlers::protected::artists;

    Router::new()
        .route("/api/artists/:id/edit", put(artists::artist_edit))
        .route("/api/artists/:id/delete", delete(artists::artist_delete))
        .route("/api/artists/:id/contact", post(artists::artist_contact))
}

fn venue_routes() -> Router<AppState> {
    use handlers::protected::venues;

    Router::new()
        .route("/api/venues/:id/edit", put(venues::venue_edit))
        .route("/api/venues/:id/delete", delete(venues::venue_delete))
}

fn profile_routes() -> Router<AppState> {
    use handlers::protected::profile;

    Router::new()
        .route("/api/profile/identity", put(profile::profile_identity))
        .route("/api/profile/technical", put(profile::profile_technical))
}

fn media_routes() -> Router<AppState> {
    use handlers::protected::media;

    Router::new().route("/api/media/signed-url", post(media::media_signed_url))
}

fn cors_layer(security: &config::SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin),
    )
}

/// Last-resort handler: a panicking request still gets a JSON 500.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");

    ApiError::internal_server_error("Internal server error").into_response()
}

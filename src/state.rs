use std::sync::Arc;

use crate::backend::{ObjectStorage, SessionExchange};
use crate::config::AppConfig;
use crate::database::MarketplaceStore;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone; every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Relational tables (profiles, artists, venues).
    pub store: Arc<dyn MarketplaceStore>,
    /// Object storage used for signed media URLs.
    pub storage: Arc<dyn ObjectStorage>,
    /// Auth service used by the sign-in callback.
    pub sessions: Arc<dyn SessionExchange>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn MarketplaceStore>,
        storage: Arc<dyn ObjectStorage>,
        sessions: Arc<dyn SessionExchange>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            storage,
            sessions,
        }
    }
}

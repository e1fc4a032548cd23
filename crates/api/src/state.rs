use std::sync::Arc;

use biblioteca_core::environment::EnvironmentProfile;
use biblioteca_db::store::CatalogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Catalog backend selected at startup.
    pub store: Arc<dyn CatalogStore>,
    /// Profile of the environment the process runs in. Fixed for its lifetime.
    pub profile: Arc<EnvironmentProfile>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>, config: ServerConfig) -> Self {
        Self {
            store,
            profile: Arc::new(config.environment.profile()),
            config: Arc::new(config),
        }
    }
}

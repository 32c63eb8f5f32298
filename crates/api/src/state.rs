//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::Services;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    services: Services,
}

impl AppState {
    /// Bundle configuration and the resolved services.
    #[must_use]
    pub fn new(config: ApiConfig, services: Services) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, services }),
        }
    }

    /// Get the application configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get the configured services.
    #[must_use]
    pub fn services(&self) -> &Services {
        &self.inner.services
    }
}

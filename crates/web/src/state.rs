//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::MarketConfig;
use crate::store::{MemoryStore, SessionStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MarketConfig,
    store: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create application state with the seeded in-memory store.
    #[must_use]
    pub fn new(config: MarketConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStore::seeded()))
    }

    /// Create application state with an explicit store implementation.
    #[must_use]
    pub fn with_store(config: MarketConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the marketplace configuration.
    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.inner.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn store(&self) -> &dyn SessionStore {
        self.inner.store.as_ref()
    }
}

//! Shared application state and domain values.

/// Per-gag feature flags.
pub mod flags;
/// Rating scale and gag kinds.
pub mod gag;

use std::sync::Arc;

use crate::{config::AppConfig, dao::flag_store::FlagStore};

/// State handle shared by every request handler.
pub type SharedState = Arc<AppState>;

/// Central application state of the flag API: the settings row store and runtime config.
pub struct AppState {
    flag_store: Arc<dyn FlagStore>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(flag_store: Arc<dyn FlagStore>, config: AppConfig) -> SharedState {
        Arc::new(Self {
            flag_store,
            config: Arc::new(config),
        })
    }

    /// Handle to the feature flag store.
    pub fn flag_store(&self) -> Arc<dyn FlagStore> {
        self.flag_store.clone()
    }

    /// Runtime configuration shared with the request handlers.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }
}

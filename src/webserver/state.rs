/// Shared application state for the webserver
///
/// Carries the code store and webserver configuration so route handlers
/// can report live counts without reaching for globals.
use crate::config::WebserverConfig;
use crate::store::CodeStore;
use std::sync::Arc;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Live code store
    pub store: Arc<CodeStore>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: WebserverConfig, store: Arc<CodeStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}

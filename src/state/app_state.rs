// Application state
// Shared by all concurrent requests; nothing in it is mutated after startup

use crate::db::DataStore;
use crate::query::QueryService;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
pub struct AppState {
    /// Query service over the dataset
    pub queries: QueryService,
    /// When the service started, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Build state around an already-opened data store
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self {
            queries: QueryService::new(store),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the service started
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

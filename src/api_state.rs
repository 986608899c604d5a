use crate::service::registry::Registry;
use chrono::{DateTime, Utc};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Registry over the store opened by `main`
    registry: Registry,

    /// When the process started serving
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            started_at: Utc::now(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn uptime_seconds(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state available to all request handlers via Axum's `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Config,
    pub visits: VisitCounter,
}

impl AppState {
    #[must_use]
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config,
            visits: VisitCounter::default(),
        }
    }
}

/// Process-wide badge hit counter. Starts at zero on every boot.
#[derive(Debug, Clone, Default)]
pub struct VisitCounter(Arc<AtomicU64>);

impl VisitCounter {
    /// Count one hit and return the new total.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    #[must_use]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

//! Application state.

use std::sync::Arc;

use meeting_store::{Database, StoreResult, UnitOfWork};

/// Shared application state.
pub struct AppState {
    /// Database pool.
    pub db: Database,
}

impl AppState {
    /// Creates new application state.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Begins a read-write unit of work.
    pub async fn write(&self) -> StoreResult<UnitOfWork> {
        self.db.begin().await
    }

    /// Begins a read-only unit of work.
    pub async fn read(&self) -> StoreResult<UnitOfWork> {
        self.db.begin_read_only().await
    }
}

/// Type alias for shared state.
pub type SharedState = Arc<AppState>;

/// Creates shared state around a database.
pub fn create_shared_state(db: Database) -> SharedState {
    Arc::new(AppState::new(db))
}

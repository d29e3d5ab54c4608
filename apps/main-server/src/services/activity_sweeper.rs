use std::{sync::Arc, time::Duration};

use meeting_store::{Database, StoreResult};
use tokio::sync::RwLock;

use super::events;

/// Default sweep interval: 1 hour
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

/// Background service that periodically deactivates events whose end date
/// has passed.
pub struct ActivitySweeper {
    db: Database,
    /// Sweep interval in seconds
    interval_secs: u64,
    /// Flag to stop the sweep loop
    stop_flag: Arc<RwLock<bool>>,
}

impl ActivitySweeper {
    /// Creates a new ActivitySweeper with the default interval
    pub fn new(db: Database) -> Self {
        Self {
            db,
            interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            stop_flag: Arc::new(RwLock::new(false)),
        }
    }

    /// Sets the sweep interval. Zero is clamped to one second.
    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    /// Spawns the sweep loop. The first sweep runs immediately.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let db = self.db.clone();
        let interval_secs = self.interval_secs;
        let stop_flag = self.stop_flag.clone();

        tokio::spawn(async move {
            tracing::info!(interval_secs, "Activity sweeper started");

            let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
            loop {
                interval.tick().await;

                if *stop_flag.read().await {
                    tracing::info!("Activity sweeper stopped");
                    break;
                }

                if let Err(e) = sweep(&db).await {
                    tracing::error!(error = %e, "Activity sweep failed");
                }
            }
        })
    }

    /// Stops the sweep loop before its next run
    pub async fn stop(&self) {
        *self.stop_flag.write().await = true;
    }

    /// Runs a sweep immediately
    pub async fn run_once(&self) -> StoreResult<u64> {
        sweep(&self.db).await
    }
}

async fn sweep(db: &Database) -> StoreResult<u64> {
    let mut uow = db.begin().await?;
    let deactivated = events::update_events_activity_today(&mut uow).await?;
    uow.commit().await?;
    Ok(deactivated)
}

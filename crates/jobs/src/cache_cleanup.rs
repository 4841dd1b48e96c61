use ferrous_rdns_application::ports::CacheMaintenancePort;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired reverse lookups.
pub struct CacheCleanupJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheCleanupJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            interval_secs: DEFAULT_CLEANUP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting reverse lookup cache cleanup job"
        );

        let job = Arc::clone(&self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(job.interval());
            // The first tick completes immediately and the cache is still empty.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = job.shutdown.cancelled() => {
                        info!("CacheCleanupJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        job.run_once().await;
                    }
                }
            }
        })
    }

    async fn run_once(&self) {
        match self.maintenance.run_cleanup_cycle().await {
            Ok(outcome) => {
                if outcome.entries_expired > 0 {
                    info!(
                        entries_expired = outcome.entries_expired,
                        cache_size = outcome.cache_size,
                        "Cache cleanup cycle completed"
                    );
                } else {
                    debug!(cache_size = outcome.cache_size, "Nothing to clean up");
                }
            }
            Err(e) => {
                error!(error = %e, "Cache cleanup cycle failed");
            }
        }
    }
}

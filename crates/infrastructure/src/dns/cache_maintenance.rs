use super::rdns_cache::ReverseDnsCache;

use async_trait::async_trait;
use ferrous_rdns_application::ports::{CacheCleanupOutcome, CacheMaintenancePort};
use ferrous_rdns_domain::DomainError;
use tracing::debug;

/// Infrastructure adapter implementing `CacheMaintenancePort`.
pub struct RdnsCacheMaintenance {
    cache: ReverseDnsCache,
}

impl RdnsCacheMaintenance {
    pub fn new(cache: ReverseDnsCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheMaintenancePort for RdnsCacheMaintenance {
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError> {
        let entries_expired = self.cache.cleanup();
        let cache_size = self.cache.len();

        debug!(
            entries_expired = entries_expired,
            cache_size = cache_size,
            expire_queue = self.cache.expire_queue_len(),
            "Reverse lookup cache cleanup finished"
        );

        Ok(CacheCleanupOutcome {
            entries_expired,
            cache_size,
        })
    }
}

use async_trait::async_trait;
use ferrous_rdns_domain::DomainError;

/// Outcome of a cache cleanup cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheCleanupOutcome {
    pub entries_expired: usize,
    pub cache_size: usize,
}

/// Port for periodic reverse lookup cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Drop every entry whose TTL has elapsed.
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError>;
}

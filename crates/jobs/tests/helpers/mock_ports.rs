#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_rdns_application::ports::{CacheCleanupOutcome, CacheMaintenancePort};
use ferrous_rdns_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct MockCacheMaintenancePort {
    cleanup_call_count: Arc<AtomicU64>,
    should_fail: AtomicBool,
    outcome: Arc<RwLock<CacheCleanupOutcome>>,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            cleanup_call_count: Arc::new(AtomicU64::new(0)),
            should_fail: AtomicBool::new(false),
            outcome: Arc::new(RwLock::new(CacheCleanupOutcome::default())),
        }
    }

    pub fn with_outcome(mut self, outcome: CacheCleanupOutcome) -> Self {
        self.outcome = Arc::new(RwLock::new(outcome));
        self
    }

    pub fn cleanup_call_count(&self) -> u64 {
        self.cleanup_call_count.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_cleanup_cycle(&self) -> Result<CacheCleanupOutcome, DomainError> {
        self.cleanup_call_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::IoError("mock cleanup failure".into()));
        }
        Ok(self.outcome.read().await.clone())
    }
}

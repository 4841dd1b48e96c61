//! Reverse DNS lookup cache.
//!
//! Maps a textual IP address to the names its PTR record resolves to. Concurrent
//! misses for one address share a single resolution; each caller bounds its own
//! wait with the lookup timeout, and a resolution that outlives an impatient
//! caller still fills the cache for the next one.

pub mod clock;
mod entry;
mod inflight;
pub mod metrics;

pub use clock::TokioClock;
pub use metrics::LookupMetrics;

use dashmap::DashMap;
use entry::{CacheEntry, ExpireList};
use ferrous_rdns_application::ports::{Clock, LookupStatsSource, ReverseResolver};
use ferrous_rdns_domain::config::CacheConfig;
use ferrous_rdns_domain::LookupStats;
use inflight::{InflightRegistry, LeaderGuard, Registration};
use metrics::bump;
use rustc_hash::FxBuildHasher;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct ReverseDnsCacheConfig {
    /// Zero selects passthrough mode: nothing is ever stored.
    pub ttl: Duration,
    pub lookup_timeout: Duration,
    /// Maximum concurrent resolutions; `None` spawns one task per miss.
    pub max_workers: Option<usize>,
}

impl From<&CacheConfig> for ReverseDnsCacheConfig {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            lookup_timeout: config.lookup_timeout(),
            max_workers: config.max_workers(),
        }
    }
}

struct Shared {
    resolver: Arc<dyn ReverseResolver>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    lookup_timeout: Duration,
    permits: Option<Arc<Semaphore>>,
    entries: DashMap<Arc<str>, CacheEntry, FxBuildHasher>,
    // Also serializes inserts so expiry times enter the queue in order.
    expire_list: Mutex<ExpireList>,
    inflight: InflightRegistry,
    metrics: LookupMetrics,
}

impl Shared {
    fn cached(&self, address: &str) -> Option<Arc<[String]>> {
        let entry = self.entries.get(address)?;
        if entry.is_expired(self.clock.now()) {
            return None;
        }
        Some(Arc::clone(&entry.names))
    }

    fn store(&self, address: &Arc<str>, names: &Arc<[String]>) {
        if self.ttl.is_zero() {
            return;
        }

        let mut expire_list = self
            .expire_list
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let expires_at = self.clock.now() + self.ttl;
        expire_list.push(Arc::clone(address), expires_at);
        self.entries.insert(
            Arc::clone(address),
            CacheEntry {
                names: Arc::clone(names),
                expires_at,
            },
        );
    }

    async fn resolve(&self, address: Arc<str>) {
        let guard = LeaderGuard::new(&self.inflight, Arc::clone(&address));

        let _permit = match &self.permits {
            Some(permits) => match Arc::clone(permits).acquire_owned().await {
                Ok(permit) => Some(permit),
                Err(_) => return,
            },
            None => None,
        };

        let deadline = Instant::now() + self.lookup_timeout;
        let names: Arc<[String]> = match self.resolver.resolve(&address, deadline).await {
            Ok(names) => names.into(),
            Err(e) => {
                debug!(
                    address = %address,
                    error = %e,
                    "PTR lookup failed, caching empty result"
                );
                Arc::from(Vec::new())
            }
        };

        self.store(&address, &names);
        debug!(address = %address, names = names.len(), "Reverse lookup resolved");

        guard.complete(names);
    }
}

/// Request-deduplicating, TTL-bounded PTR cache. Cloning shares the same table.
#[derive(Clone)]
pub struct ReverseDnsCache {
    inner: Arc<Shared>,
}

impl ReverseDnsCache {
    pub fn new(resolver: Arc<dyn ReverseResolver>, config: ReverseDnsCacheConfig) -> Self {
        Self::with_clock(resolver, config, Arc::new(TokioClock))
    }

    pub fn with_clock(
        resolver: Arc<dyn ReverseResolver>,
        config: ReverseDnsCacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            inner: Arc::new(Shared {
                resolver,
                clock,
                ttl: config.ttl,
                lookup_timeout: config.lookup_timeout,
                permits: config.max_workers.map(|n| Arc::new(Semaphore::new(n))),
                entries: DashMap::with_hasher(FxBuildHasher),
                expire_list: Mutex::new(ExpireList::default()),
                inflight: InflightRegistry::default(),
                metrics: LookupMetrics::default(),
            }),
        }
    }

    /// Names for `address`, or an empty list when none are known in time.
    ///
    /// Never fails: resolver errors are cached as empty results, and a caller whose
    /// timeout elapses first gets an empty list while the resolution carries on.
    pub async fn lookup(&self, address: &str) -> Vec<String> {
        let shared = &self.inner;

        if let Some(names) = shared.cached(address) {
            bump(&shared.metrics.cache_hit);
            debug!(address = %address, "Cache HIT");
            return names.to_vec();
        }

        let rx = match shared
            .inflight
            .register_or_join(address, || shared.cached(address))
        {
            Registration::Cached(names) => {
                bump(&shared.metrics.cache_hit);
                debug!(address = %address, "Cache HIT");
                return names.to_vec();
            }
            Registration::Follower(rx) => {
                bump(&shared.metrics.cache_miss);
                debug!(address = %address, "Cache MISS, joining pending lookup");
                rx
            }
            Registration::Leader(key, rx) => {
                bump(&shared.metrics.cache_miss);
                debug!(address = %address, "Cache MISS");
                let worker = Arc::clone(shared);
                tokio::spawn(async move { worker.resolve(key).await });
                rx
            }
        };

        match tokio::time::timeout(shared.lookup_timeout, inflight::wait_for_result(rx)).await {
            Ok(Some(names)) => {
                bump(&shared.metrics.requests_filled);
                names.to_vec()
            }
            Ok(None) => Vec::new(),
            Err(_) => {
                bump(&shared.metrics.requests_abandoned);
                debug!(
                    address = %address,
                    timeout_ms = shared.lookup_timeout.as_millis() as u64,
                    "Reverse lookup abandoned"
                );
                Vec::new()
            }
        }
    }

    /// Drops every entry whose TTL has elapsed and returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let shared = &self.inner;
        let now = shared.clock.now();
        let mut removed = 0;

        let mut expire_list = shared
            .expire_list
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        while let Some(record) = expire_list.pop_expired(now) {
            // The entry may have been re-resolved since this record was queued.
            if shared
                .entries
                .remove_if(&*record.address, |_, entry| entry.is_expired(now))
                .is_some()
            {
                bump(&shared.metrics.cache_expire);
                removed += 1;
            }
        }

        if removed > 0 {
            debug!(
                removed = removed,
                remaining = shared.entries.len(),
                "Expired reverse lookups removed"
            );
        }
        removed
    }

    pub fn stats(&self) -> LookupStats {
        self.inner.metrics.snapshot()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    pub fn expire_queue_len(&self) -> usize {
        self.inner
            .expire_list
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of resolutions currently running or waiting for a permit.
    pub fn pending_len(&self) -> usize {
        self.inner.inflight.len()
    }
}

impl LookupStatsSource for ReverseDnsCache {
    fn stats(&self) -> LookupStats {
        ReverseDnsCache::stats(self)
    }

    fn cache_size(&self) -> usize {
        self.len()
    }
}

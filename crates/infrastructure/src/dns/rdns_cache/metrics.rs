use ferrous_rdns_domain::LookupStats;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

// align(64) keeps the per-lookup counters on their own cache line, away from
// the counters that only move on resolution or cleanup.
#[derive(Default)]
#[repr(align(64))]
pub struct LookupMetrics {
    // Hot: touched by every lookup.
    pub cache_hit: AtomicU64,
    pub cache_miss: AtomicU64,
    _hot_pad: [u64; 6],

    pub cache_expire: AtomicU64,
    pub requests_filled: AtomicU64,
    pub requests_abandoned: AtomicU64,
}

impl LookupMetrics {
    pub fn snapshot(&self) -> LookupStats {
        LookupStats {
            cache_hit: self.cache_hit.load(AtomicOrdering::Relaxed),
            cache_miss: self.cache_miss.load(AtomicOrdering::Relaxed),
            cache_expire: self.cache_expire.load(AtomicOrdering::Relaxed),
            requests_filled: self.requests_filled.load(AtomicOrdering::Relaxed),
            requests_abandoned: self.requests_abandoned.load(AtomicOrdering::Relaxed),
        }
    }
}

#[inline]
pub(super) fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, AtomicOrdering::Relaxed);
}

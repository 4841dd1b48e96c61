#![allow(dead_code)]

use ferrous_rdns_application::ports::LookupStatsSource;
use ferrous_rdns_domain::LookupStats;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub struct MockStatsSource {
    stats: Mutex<LookupStats>,
    cache_size: usize,
    call_count: AtomicU64,
}

impl MockStatsSource {
    pub fn new(stats: LookupStats, cache_size: usize) -> Self {
        Self {
            stats: Mutex::new(stats),
            cache_size,
            call_count: AtomicU64::new(0),
        }
    }

    pub fn set_stats(&self, stats: LookupStats) {
        *self.stats.lock().unwrap() = stats;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl LookupStatsSource for MockStatsSource {
    fn stats(&self) -> LookupStats {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.stats.lock().unwrap()
    }

    fn cache_size(&self) -> usize {
        self.cache_size
    }
}

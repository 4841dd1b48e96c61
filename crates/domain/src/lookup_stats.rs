use serde::Serialize;

/// Point-in-time copy of the reverse lookup counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LookupStats {
    pub cache_hit: u64,
    pub cache_miss: u64,
    pub cache_expire: u64,
    pub requests_filled: u64,
    pub requests_abandoned: u64,
}

impl LookupStats {
    pub fn total_lookups(&self) -> u64 {
        self.cache_hit + self.cache_miss
    }

    /// Percentage of lookups answered from the cache table.
    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total > 0 {
            (self.cache_hit as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Lifetime of a resolved entry. Zero disables caching entirely.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// How long a single caller waits for a resolution before giving up.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,

    /// Upper bound on concurrent PTR queries. Negative means unbounded.
    #[serde(default = "default_max_parallel_lookups")]
    pub max_parallel_lookups: i64,

    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    /// `None` when lookups are not gated by a permit.
    pub fn max_workers(&self) -> Option<usize> {
        usize::try_from(self.max_parallel_lookups).ok()
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
            max_parallel_lookups: default_max_parallel_lookups(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    86_400
}

fn default_lookup_timeout_ms() -> u64 {
    3_000
}

fn default_max_parallel_lookups() -> i64 {
    10
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

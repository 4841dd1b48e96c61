use std::collections::VecDeque;
use std::sync::Arc;
use tokio::time::Instant;

pub(super) struct CacheEntry {
    pub names: Arc<[String]>,
    pub expires_at: Instant,
}

impl CacheEntry {
    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

pub(super) struct ExpireRecord {
    pub address: Arc<str>,
    pub expires_at: Instant,
}

/// Insertion-ordered expiry queue.
///
/// Records are pushed with non-decreasing `expires_at` (constant TTL, pushes
/// serialized by the caller), so draining can stop at the first live record.
#[derive(Default)]
pub(super) struct ExpireList {
    records: VecDeque<ExpireRecord>,
}

impl ExpireList {
    pub fn push(&mut self, address: Arc<str>, expires_at: Instant) {
        debug_assert!(self
            .records
            .back()
            .map_or(true, |last| last.expires_at <= expires_at));
        self.records.push_back(ExpireRecord {
            address,
            expires_at,
        });
    }

    pub fn pop_expired(&mut self, now: Instant) -> Option<ExpireRecord> {
        if self.records.front()?.expires_at <= now {
            self.records.pop_front()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

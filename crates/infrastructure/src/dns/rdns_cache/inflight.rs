use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::watch;

pub(super) type InflightReceiver = watch::Receiver<Option<Arc<[String]>>>;
type InflightSender = watch::Sender<Option<Arc<[String]>>>;

pub(super) enum Registration {
    /// Caller owns the new pending request and must dispatch the resolution.
    Leader(Arc<str>, InflightReceiver),
    /// A resolution for the address is already running.
    Follower(InflightReceiver),
    /// Resolution finished between the first cache probe and registration.
    Cached(Arc<[String]>),
}

/// Pending PTR resolutions keyed by address; at most one per address.
#[derive(Default)]
pub(super) struct InflightRegistry {
    pending: DashMap<Arc<str>, InflightSender, FxBuildHasher>,
}

impl InflightRegistry {
    /// Joins the pending request for `address` or registers a new one.
    ///
    /// `recheck` runs under the registry's shard lock. A leader always stores its
    /// result before deregistering, so a vacant slot plus a fresh cache entry means
    /// the work is already done.
    pub fn register_or_join(
        &self,
        address: &str,
        recheck: impl FnOnce() -> Option<Arc<[String]>>,
    ) -> Registration {
        match self.pending.entry(Arc::from(address)) {
            Entry::Occupied(e) => Registration::Follower(e.get().subscribe()),
            Entry::Vacant(e) => {
                if let Some(names) = recheck() {
                    return Registration::Cached(names);
                }
                let key = Arc::clone(e.key());
                let (tx, rx) = watch::channel(None);
                e.insert(tx);
                Registration::Leader(key, rx)
            }
        }
    }

    /// Deregisters `address` and hands `names` to every subscribed waiter.
    pub fn complete(&self, address: &str, names: Arc<[String]>) {
        if let Some((_, tx)) = self.pending.remove(address) {
            let _ = tx.send(Some(names));
        }
    }

    fn discard(&self, address: &str) {
        self.pending.remove(address);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Deregisters a pending request if its resolution task ends without completing,
/// which closes the channel and releases every waiter.
pub(super) struct LeaderGuard<'a> {
    registry: &'a InflightRegistry,
    address: Arc<str>,
    completed: bool,
}

impl<'a> LeaderGuard<'a> {
    pub fn new(registry: &'a InflightRegistry, address: Arc<str>) -> Self {
        Self {
            registry,
            address,
            completed: false,
        }
    }

    pub fn complete(mut self, names: Arc<[String]>) {
        self.completed = true;
        self.registry.complete(&self.address, names);
    }
}

impl Drop for LeaderGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.registry.discard(&self.address);
        }
    }
}

/// Waits for the leader's result. `None` if the leader went away without one.
pub(super) async fn wait_for_result(mut rx: InflightReceiver) -> Option<Arc<[String]>> {
    match rx.wait_for(Option::is_some).await {
        Ok(result) => result.clone(),
        Err(_) => None,
    }
}

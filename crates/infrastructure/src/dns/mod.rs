pub mod cache_maintenance;
pub mod forwarding;
pub mod ptr_resolver;
pub mod rdns_cache;
pub mod transport;

pub use cache_maintenance::RdnsCacheMaintenance;
pub use ptr_resolver::PtrResolver;
pub use rdns_cache::{ReverseDnsCache, ReverseDnsCacheConfig, TokioClock};

mod cache_maintenance_port;
mod clock;
mod lookup_stats_source;
mod record_sink;
mod reverse_resolver;

pub use cache_maintenance_port::{CacheCleanupOutcome, CacheMaintenancePort};
pub use clock::Clock;
pub use lookup_stats_source::LookupStatsSource;
pub use record_sink::RecordSink;
pub use reverse_resolver::ReverseResolver;

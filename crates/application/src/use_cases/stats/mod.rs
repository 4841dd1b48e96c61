mod get_lookup_stats;

pub use get_lookup_stats::{GetLookupStatsUseCase, LookupStatsReport};

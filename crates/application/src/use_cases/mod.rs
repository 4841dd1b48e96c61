pub mod stats;

pub use stats::{GetLookupStatsUseCase, LookupStatsReport};

use crate::ports::LookupStatsSource;
use ferrous_rdns_domain::LookupStats;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct LookupStatsReport {
    #[serde(flatten)]
    pub stats: LookupStats,
    pub cache_size: usize,
    pub hit_rate: f64,
}

pub struct GetLookupStatsUseCase {
    source: Arc<dyn LookupStatsSource>,
}

impl GetLookupStatsUseCase {
    pub fn new(source: Arc<dyn LookupStatsSource>) -> Self {
        Self { source }
    }

    pub fn execute(&self) -> LookupStatsReport {
        let stats = self.source.stats();
        LookupStatsReport {
            stats,
            cache_size: self.source.cache_size(),
            hit_rate: stats.hit_rate(),
        }
    }
}

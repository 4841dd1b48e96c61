use ferrous_rdns_domain::LookupStats;

pub trait LookupStatsSource: Send + Sync {
    fn stats(&self) -> LookupStats;

    fn cache_size(&self) -> usize;
}

use ferrous_rdns_application::ports::CacheMaintenancePort;
use ferrous_rdns_application::use_cases::GetLookupStatsUseCase;
use ferrous_rdns_domain::Config;
use ferrous_rdns_infrastructure::dns::{
    PtrResolver, RdnsCacheMaintenance, ReverseDnsCache, ReverseDnsCacheConfig,
};
use std::sync::Arc;
use tracing::info;

pub struct LookupServices {
    pub cache: ReverseDnsCache,
    pub cache_maintenance: Arc<dyn CacheMaintenancePort>,
    pub get_stats: Arc<GetLookupStatsUseCase>,
}

impl LookupServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let servers = config.resolver.server_addrs()?;
        let cache_config = ReverseDnsCacheConfig::from(&config.cache);

        info!(
            servers = ?servers,
            ttl_secs = cache_config.ttl.as_secs(),
            lookup_timeout_ms = cache_config.lookup_timeout.as_millis() as u64,
            max_workers = ?cache_config.max_workers,
            "Initializing reverse lookup services"
        );

        let resolver = Arc::new(PtrResolver::new(servers));
        let cache = ReverseDnsCache::new(resolver, cache_config);
        let cache_maintenance: Arc<dyn CacheMaintenancePort> =
            Arc::new(RdnsCacheMaintenance::new(cache.clone()));
        let get_stats = Arc::new(GetLookupStatsUseCase::new(Arc::new(cache.clone())));

        Ok(Self {
            cache,
            cache_maintenance,
            get_stats,
        })
    }
}

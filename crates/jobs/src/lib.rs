pub mod cache_cleanup;
pub mod runner;

pub use cache_cleanup::CacheCleanupJob;
pub use runner::JobRunner;

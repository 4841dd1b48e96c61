pub mod cache;
pub mod errors;
pub mod logging;
pub mod pipeline;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use pipeline::PipelineConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};

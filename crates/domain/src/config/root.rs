use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::pipeline::PipelineConfig;
use super::resolver::ResolverConfig;

/// Main configuration structure for Ferrous rDNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Lookup cache tuning (TTL, timeout, parallelism, cleanup cadence)
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream servers used for PTR queries
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Record processing pipeline
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-rdns.toml in current directory
    /// 3. /etc/ferrous-rdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ttl) = overrides.ttl_secs {
            self.cache.ttl_secs = ttl;
        }
        if let Some(timeout) = overrides.lookup_timeout_ms {
            self.cache.lookup_timeout_ms = timeout;
        }
        if let Some(max) = overrides.max_parallel_lookups {
            self.cache.max_parallel_lookups = max;
        }
        if let Some(workers) = overrides.workers {
            self.pipeline.workers = workers;
        }
        if !overrides.servers.is_empty() {
            self.resolver.servers = overrides.servers;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.workers == 0 {
            return Err(ConfigError::Validation(
                "Pipeline needs at least one worker".to_string(),
            ));
        }

        if self.cache.max_parallel_lookups == 0 {
            return Err(ConfigError::Validation(
                "max_parallel_lookups cannot be 0 (use a negative value for unbounded)"
                    .to_string(),
            ));
        }

        if self.cache.cleanup_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "cleanup_interval_secs must be greater than 0".to_string(),
            ));
        }

        if self.resolver.servers.is_empty() {
            return Err(ConfigError::Validation(
                "No resolver servers configured".to_string(),
            ));
        }

        self.resolver.server_addrs()?;

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("ferrous-rdns.toml").exists() {
            Some("ferrous-rdns.toml".to_string())
        } else if std::path::Path::new("/etc/ferrous-rdns/config.toml").exists() {
            Some("/etc/ferrous-rdns/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ttl_secs: Option<u64>,
    pub lookup_timeout_ms: Option<u64>,
    pub max_parallel_lookups: Option<i64>,
    pub workers: Option<usize>,
    pub servers: Vec<String>,
    pub log_level: Option<String>,
}

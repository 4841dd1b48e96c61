use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Upstream servers queried in order, `ip:port`.
    #[serde(default = "default_servers")]
    pub servers: Vec<String>,
}

impl ResolverConfig {
    pub fn server_addrs(&self) -> Result<Vec<SocketAddr>, ConfigError> {
        self.servers
            .iter()
            .map(|s| {
                s.parse::<SocketAddr>().map_err(|e| {
                    ConfigError::Validation(format!("Invalid resolver server '{}': {}", s, e))
                })
            })
            .collect()
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
        }
    }
}

fn default_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

//! Ferrous rDNS Domain Layer
pub mod config;
pub mod errors;
pub mod lookup_stats;

pub use config::{CliOverrides, Config};
pub use errors::DomainError;
pub use lookup_stats::LookupStats;

//! Ferrous rDNS Infrastructure Layer
pub mod dns;
pub mod pipeline;

pub mod udp;

use async_trait::async_trait;
use ferrous_rdns_domain::DomainError;
use tokio::time::Instant;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Sends one query and waits for the response carrying the same message ID,
    /// giving up at `deadline`.
    async fn send(
        &self,
        message_bytes: &[u8],
        deadline: Instant,
    ) -> Result<TransportResponse, DomainError>;
}

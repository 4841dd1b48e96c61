use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use ferrous_rdns_application::ports::ReverseResolver;
use ferrous_rdns_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use tokio::time::Instant;
use tracing::debug;

/// Resolves addresses through PTR queries sent to upstream servers in order.
pub struct PtrResolver {
    transports: Vec<UdpTransport>,
}

impl PtrResolver {
    pub fn new(servers: Vec<SocketAddr>) -> Self {
        Self {
            transports: servers.into_iter().map(UdpTransport::new).collect(),
        }
    }

    pub fn ip_to_reverse_domain(ip: &IpAddr) -> String {
        match ip {
            IpAddr::V4(ipv4) => {
                let octets = ipv4.octets();
                format!(
                    "{}.{}.{}.{}.in-addr.arpa.",
                    octets[3], octets[2], octets[1], octets[0]
                )
            }
            IpAddr::V6(ipv6) => {
                let mut nibbles = Vec::with_capacity(32);
                for byte in ipv6.octets().iter().rev() {
                    nibbles.push(format!("{:x}", byte & 0x0f));
                    nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
                }
                format!("{}.ip6.arpa.", nibbles.join("."))
            }
        }
    }

    async fn query_server(
        transport: &UdpTransport,
        reverse_domain: &str,
        deadline: Instant,
    ) -> Result<Vec<String>, DomainError> {
        let (id, query) = MessageBuilder::build_ptr_query(reverse_domain)?;
        let response = transport.send(&query, deadline).await?;
        let parsed = ResponseParser::parse(&response.bytes)?;

        if parsed.id != id {
            return Err(DomainError::InvalidDnsResponse(format!(
                "Response ID {} does not match query ID {}",
                parsed.id, id
            )));
        }

        if parsed.truncated {
            debug!(
                server = %transport.server_addr(),
                names = parsed.names.len(),
                "PTR response truncated, using the records received"
            );
        }

        if !parsed.is_answer() {
            return Err(DomainError::ServerFailure(format!(
                "{} answered {}",
                transport.server_addr(),
                ResponseParser::rcode_to_status(parsed.rcode)
            )));
        }

        Ok(parsed.names)
    }
}

#[async_trait]
impl ReverseResolver for PtrResolver {
    async fn resolve(&self, address: &str, deadline: Instant) -> Result<Vec<String>, DomainError> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;
        let reverse_domain = Self::ip_to_reverse_domain(&ip);

        debug!(
            ip = %ip,
            reverse_domain = %reverse_domain,
            "Performing PTR lookup"
        );

        let mut last_error = DomainError::NoUpstreamServers;

        for transport in &self.transports {
            if Instant::now() >= deadline {
                return Err(DomainError::QueryTimeout);
            }

            match Self::query_server(transport, &reverse_domain, deadline).await {
                Ok(names) => {
                    debug!(
                        ip = %ip,
                        server = %transport.server_addr(),
                        names = names.len(),
                        "PTR lookup successful"
                    );
                    return Ok(names);
                }
                Err(e) => {
                    debug!(
                        ip = %ip,
                        server = %transport.server_addr(),
                        error = %e,
                        "PTR lookup failed"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

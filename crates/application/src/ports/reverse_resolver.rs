use async_trait::async_trait;
use ferrous_rdns_domain::DomainError;
use tokio::time::Instant;

/// Performs a PTR lookup for a textual IP address.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Returns the names published for `address`, possibly none.
    ///
    /// Implementations must give up and return an error once `deadline` has passed
    /// instead of blocking beyond it.
    async fn resolve(&self, address: &str, deadline: Instant) -> Result<Vec<String>, DomainError>;
}

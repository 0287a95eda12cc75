use async_trait::async_trait;
use answer_dns_domain::DomainError;
use std::net::SocketAddr;

/// Resolves recursion targets written as hostnames.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, DomainError>;
}

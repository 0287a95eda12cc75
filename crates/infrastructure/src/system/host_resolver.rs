use answer_dns_application::ports::HostResolver;
use answer_dns_domain::DomainError;
use async_trait::async_trait;
use std::net::SocketAddr;
use tracing::debug;

/// Resolves recursion target hostnames through the operating system resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostResolver;

impl SystemHostResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, DomainError> {
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((hostname, port))
            .await
            .map_err(|e| {
                DomainError::InvalidUpstream(format!("Failed to resolve {}: {}", hostname, e))
            })?
            .collect();

        debug!(hostname = %hostname, port, resolved = addrs.len(), "Resolved recursion target");
        Ok(addrs)
    }
}

use async_trait::async_trait;
use answer_dns_domain::{DomainError, TransportProtocol};
use std::net::SocketAddr;
use std::time::Duration;

/// Sends one raw DNS message to an upstream and returns its raw reply.
///
/// Implementations return a transport error for timeouts, connection failures
/// and replies that do not parse as a DNS message.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        protocol: TransportProtocol,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}

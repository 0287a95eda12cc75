//! Upstream exchanges over plain DNS transports (RFC 1035 §4.2).

pub mod tcp;
pub mod udp;

use answer_dns_application::ports::UpstreamTransport;
use answer_dns_domain::{DomainError, TransportProtocol};
use async_trait::async_trait;
use hickory_proto::op::Message;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// Forwards over the same transport the client used.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetworkTransport;

impl NetworkTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UpstreamTransport for NetworkTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        protocol: TransportProtocol,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let reply = match protocol {
            TransportProtocol::Udp => udp::exchange(server, message, timeout).await?,
            TransportProtocol::Tcp => tcp::exchange(server, message, timeout).await?,
        };

        Message::from_vec(&reply).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Unparseable reply from {}: {}", server, e))
        })?;
        Ok(reply)
    }
}

pub(crate) fn map_io_error(server: SocketAddr, action: &str, e: io::Error) -> DomainError {
    let server = server.to_string();
    match e.kind() {
        io::ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused { server },
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            DomainError::TransportConnectionReset { server }
        }
        io::ErrorKind::TimedOut => DomainError::TransportTimeout { server },
        _ => DomainError::TransportError {
            server,
            reason: format!("{}: {}", action, e),
        },
    }
}

pub(crate) fn timeout_error(server: SocketAddr) -> DomainError {
    DomainError::TransportTimeout {
        server: server.to_string(),
    }
}

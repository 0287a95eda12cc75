//! Single-datagram exchange (RFC 1035 §4.2.1).
//!
//! The reply is relayed as received. A truncated reply keeps its TC bit so the
//! client retries over TCP.

use super::{map_io_error, timeout_error};
use answer_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Receive buffer size, large enough for any EDNS(0) payload we advertise.
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub async fn exchange(
    server: SocketAddr,
    message: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    let bind_addr: SocketAddr = if server.is_ipv4() {
        (Ipv4Addr::UNSPECIFIED, 0).into()
    } else {
        (Ipv6Addr::UNSPECIFIED, 0).into()
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(|e| map_io_error(server, "bind", e))?;
    // Connected sockets drop datagrams from other sources and surface ICMP refusals.
    socket
        .connect(server)
        .await
        .map_err(|e| map_io_error(server, "connect", e))?;

    let bytes_sent = tokio::time::timeout(timeout, socket.send(message))
        .await
        .map_err(|_| timeout_error(server))?
        .map_err(|e| map_io_error(server, "send", e))?;
    debug!(server = %server, bytes_sent, "UDP query sent");

    let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
    let bytes_received = tokio::time::timeout(timeout, socket.recv(&mut recv_buf))
        .await
        .map_err(|_| timeout_error(server))?
        .map_err(|e| map_io_error(server, "receive", e))?;

    recv_buf.truncate(bytes_received);
    debug!(server = %server, bytes_received, "UDP response received");
    Ok(recv_buf)
}

//! Length-prefixed exchange over a fresh TCP connection (RFC 1035 §4.2.2).

use super::{map_io_error, timeout_error};
use answer_dns_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = 65535;

pub async fn exchange(
    server: SocketAddr,
    message: &[u8],
    timeout: Duration,
) -> Result<Vec<u8>, DomainError> {
    let mut stream = tokio::time::timeout(timeout, TcpStream::connect(server))
        .await
        .map_err(|_| timeout_error(server))?
        .map_err(|e| map_io_error(server, "connect", e))?;
    stream
        .set_nodelay(true)
        .map_err(|e| map_io_error(server, "set TCP_NODELAY", e))?;

    tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message))
        .await
        .map_err(|_| timeout_error(server))?
        .map_err(|e| map_io_error(server, "send", e))?;
    debug!(server = %server, message_len = message.len(), "TCP query sent");

    let response = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
        .await
        .map_err(|_| timeout_error(server))?
        .map_err(|e| map_io_error(server, "receive", e))?;
    debug!(server = %server, response_len = response.len(), "TCP response received");

    Ok(response)
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message: &[u8],
) -> std::io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    if message.len() > MAX_TCP_MESSAGE_SIZE {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("message too large: {} bytes", message.len()),
        ));
    }
    let length = (message.len() as u16).to_be_bytes();
    stream.write_all(&length).await?;
    stream.write_all(message).await?;
    stream.flush().await
}

pub(crate) async fn read_with_length_prefix<S>(stream: &mut S) -> std::io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let mut response = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut response).await?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_length_prefix_framing() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        send_with_length_prefix(&mut client, &[1, 2, 3, 4, 5])
            .await
            .unwrap();
        let mut prefix = [0u8; 2];
        server.read_exact(&mut prefix).await.unwrap();
        assert_eq!(prefix, [0, 5]);

        server.write_all(&[0, 3, 9, 8, 7]).await.unwrap();
        assert_eq!(read_with_length_prefix(&mut client).await.unwrap(), vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn test_short_read_is_error() {
        let (mut client, mut server) = tokio::io::duplex(64);
        server.write_all(&[0, 10, 1, 2]).await.unwrap();
        drop(server);
        assert!(read_with_length_prefix(&mut client).await.is_err());
    }
}

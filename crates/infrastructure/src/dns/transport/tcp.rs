use super::{resolve_upstream, DnsTransport, TransportResponse};
use async_trait::async_trait;
use netdns_domain::{DomainError, UpstreamAddr};
use std::io;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = u16::MAX as usize;

/// DNS over TCP transport, one fresh connection per query.
pub struct TcpTransport {
    upstream_addr: UpstreamAddr,
}

impl TcpTransport {
    pub fn new(upstream_addr: UpstreamAddr) -> Self {
        Self { upstream_addr }
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.upstream_addr
    }

    fn upstream_error(&self, reason: String) -> DomainError {
        DomainError::Upstream {
            server: self.upstream_addr.to_string(),
            reason,
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            server: self.upstream_addr.to_string(),
        }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        let stream = tokio::time::timeout(timeout, TcpStream::connect(server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.upstream_error(format!("Connection refused: {}", e)))?;

        stream
            .set_nodelay(true)
            .map_err(|e| self.upstream_error(format!("Failed to set TCP_NODELAY: {}", e)))?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(timeout, write_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.upstream_error(format!("Failed to send TCP query: {}", e)))?;

        debug!(
            server = %self.upstream_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.upstream_error(format!("Failed to read TCP response: {}", e)))?;

        debug!(
            server = %self.upstream_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}

/// Write `u16 BE length || message` and flush.
pub async fn write_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    if message_bytes.len() > MAX_TCP_MESSAGE_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "Message too large for TCP framing: {} bytes (max {})",
                message_bytes.len(),
                MAX_TCP_MESSAGE_SIZE
            ),
        ));
    }

    let length_bytes = (message_bytes.len() as u16).to_be_bytes();

    // One buffer so the prefix and body leave in the same segment.
    let mut framed = Vec::with_capacity(2 + message_bytes.len());
    framed.extend_from_slice(&length_bytes);
    framed.extend_from_slice(message_bytes);

    stream.write_all(&framed).await?;
    stream.flush().await
}

/// Read one length-prefixed message, assembling partial reads.
pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;

    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;

    Ok(message)
}

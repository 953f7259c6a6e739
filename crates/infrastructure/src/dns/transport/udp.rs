//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). The socket is connected to the
//! upstream so datagrams from any other source are discarded by the kernel.

use super::{resolve_upstream, DnsTransport, TransportResponse};
use async_trait::async_trait;
use netdns_domain::{DomainError, UpstreamAddr};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest upstream datagram accepted
const MAX_UDP_RESPONSE_SIZE: usize = 8192;

/// DNS over UDP transport
pub struct UdpTransport {
    upstream_addr: UpstreamAddr,
}

impl UdpTransport {
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
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let server_addr = resolve_upstream(&self.upstream_addr).await?;

        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.upstream_error(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .connect(server_addr)
            .await
            .map_err(|e| self.upstream_error(format!("Failed to connect UDP socket: {}", e)))?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.upstream_error(format!("Failed to send UDP query: {}", e)))?;

        debug!(
            server = %server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(timeout, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.upstream_error(format!("Failed to receive UDP response: {}", e)))?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

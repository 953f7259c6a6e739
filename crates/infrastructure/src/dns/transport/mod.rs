pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use netdns_domain::{DomainError, Protocol, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One query/response exchange with an upstream server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

pub enum Transport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl Transport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp(_) => "UDP",
            Self::Tcp(_) => "TCP",
        }
    }
}

/// Upstream transport speaking the same protocol the client used.
pub fn create_transport(protocol: Protocol, upstream: UpstreamAddr) -> Transport {
    match protocol {
        Protocol::Udp => Transport::Udp(udp::UdpTransport::new(upstream)),
        Protocol::Tcp => Transport::Tcp(tcp::TcpTransport::new(upstream)),
    }
}

/// Pair of transports to one upstream, picked per request by protocol.
pub struct UpstreamTransports {
    udp: Transport,
    tcp: Transport,
}

impl UpstreamTransports {
    pub fn new(upstream: &UpstreamAddr) -> Self {
        Self {
            udp: create_transport(Protocol::Udp, upstream.clone()),
            tcp: create_transport(Protocol::Tcp, upstream.clone()),
        }
    }

    pub fn for_protocol(&self, protocol: Protocol) -> &Transport {
        match protocol {
            Protocol::Udp => &self.udp,
            Protocol::Tcp => &self.tcp,
        }
    }
}

/// Resolve a hostname upstream to its first address.
pub(crate) async fn resolve_upstream(upstream: &UpstreamAddr) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = upstream.socket_addr() {
        return Ok(addr);
    }

    let host = upstream.hostname_str().unwrap_or_default();
    let mut addrs = tokio::net::lookup_host((host, upstream.port()))
        .await
        .map_err(|e| DomainError::Upstream {
            server: upstream.to_string(),
            reason: format!("Failed to resolve hostname: {}", e),
        })?;

    addrs.next().ok_or_else(|| DomainError::Upstream {
        server: upstream.to_string(),
        reason: "Hostname resolved to no addresses".to_string(),
    })
}

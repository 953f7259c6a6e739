use crate::dns_protocol::Protocol;
use std::net::SocketAddr;

/// Where a message came from and how it arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestContext {
    pub client: SocketAddr,
    pub protocol: Protocol,
}

impl RequestContext {
    pub fn new(client: SocketAddr, protocol: Protocol) -> Self {
        Self { client, protocol }
    }

    pub fn udp(client: SocketAddr) -> Self {
        Self::new(client, Protocol::Udp)
    }

    pub fn tcp(client: SocketAddr) -> Self {
        Self::new(client, Protocol::Tcp)
    }
}

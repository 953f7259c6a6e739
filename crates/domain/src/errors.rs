use crate::dns_protocol::Protocol;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Failed to bind {protocol} socket on {addr}: {reason}")]
    Bind {
        protocol: Protocol,
        addr: String,
        reason: String,
    },

    #[error("Invalid DNS message: {0}")]
    Decode(String),

    #[error("Failed to encode DNS message: {0}")]
    Encode(String),

    #[error("Resolution failed: {0}")]
    Resolve(String),

    #[error("Upstream {server} failed: {reason}")]
    Upstream { server: String, reason: String },

    #[error("Upstream {server} timed out")]
    UpstreamTimeout { server: String },

    #[error("Failed to read request from {client}: {reason}")]
    TransportRead { client: String, reason: String },

    #[error("Failed to write reply to {client}: {reason}")]
    TransportWrite { client: String, reason: String },

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),
}

impl DomainError {
    /// Errors raised while computing an answer, as opposed to reading or
    /// writing the client's bytes.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            Self::Resolve(_) | Self::Upstream { .. } | Self::UpstreamTimeout { .. }
        )
    }
}

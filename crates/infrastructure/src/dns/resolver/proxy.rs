use crate::dns::transport::UpstreamTransports;
use async_trait::async_trait;
use hickory_proto::op::Message;
use netdns_application::ports::DnsResolver;
use netdns_application::services::message_codec;
use netdns_domain::{DomainError, RequestContext, UpstreamAddr};
use std::time::Duration;
use tracing::debug;

/// Forwards each request to one upstream server and returns its reply.
///
/// The upstream is contacted over the protocol the client used. The reply is
/// relayed as decoded, without checking its id against the request.
pub struct ProxyResolver {
    upstream: UpstreamAddr,
    transports: UpstreamTransports,
    timeout: Duration,
}

impl ProxyResolver {
    pub fn new(upstream: UpstreamAddr, timeout: Duration) -> Self {
        let transports = UpstreamTransports::new(&upstream);
        Self {
            upstream,
            transports,
            timeout,
        }
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.upstream
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl DnsResolver for ProxyResolver {
    async fn resolve(
        &self,
        request: &Message,
        ctx: &RequestContext,
    ) -> Result<Message, DomainError> {
        let query_bytes = message_codec::encode(request)?;
        let transport = self.transports.for_protocol(ctx.protocol);

        let response = transport.send(&query_bytes, self.timeout).await?;

        debug!(
            upstream = %self.upstream,
            protocol = response.protocol_used,
            bytes = response.bytes.len(),
            "Upstream replied"
        );

        message_codec::decode(&response.bytes).map_err(|e| DomainError::Upstream {
            server: self.upstream.to_string(),
            reason: format!("Malformed reply: {}", e),
        })
    }

    fn name(&self) -> &'static str {
        "ProxyResolver"
    }
}

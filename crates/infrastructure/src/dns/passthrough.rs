use crate::dns::transport::UpstreamTransports;
use async_trait::async_trait;
use netdns_application::ports::{DnsHandler, DnsLogger};
use netdns_application::services::message_codec;
use netdns_domain::{RequestContext, UpstreamAddr};
use std::sync::Arc;
use std::time::Duration;

/// Relays raw client bytes to the upstream and returns its bytes unchanged.
///
/// Nothing is re-encoded: a client can send anything, including messages the
/// codec would reject, and the upstream's answer reaches it byte for byte.
/// Decoding happens only to feed the request/reply hooks.
pub struct PassthroughHandler {
    upstream: UpstreamAddr,
    transports: UpstreamTransports,
    timeout: Duration,
    logger: Arc<dyn DnsLogger>,
}

impl PassthroughHandler {
    pub fn new(upstream: UpstreamAddr, timeout: Duration, logger: Arc<dyn DnsLogger>) -> Self {
        let transports = UpstreamTransports::new(&upstream);
        Self {
            upstream,
            transports,
            timeout,
            logger,
        }
    }

    pub fn upstream(&self) -> &UpstreamAddr {
        &self.upstream
    }
}

#[async_trait]
impl DnsHandler for PassthroughHandler {
    async fn handle_message(&self, raw: &[u8], ctx: &RequestContext) -> Option<Vec<u8>> {
        if let Ok(request) = message_codec::decode(raw) {
            self.logger.log_request(ctx, &request);
            self.logger.log_data(ctx, &request);
        }

        let response = match self
            .transports
            .for_protocol(ctx.protocol)
            .send(raw, self.timeout)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.logger.log_error(ctx, &e);
                return None;
            }
        };

        if let Ok(reply) = message_codec::decode(&response.bytes) {
            self.logger.log_reply(ctx, &reply);
            self.logger.log_data(ctx, &reply);
        }

        Some(response.bytes)
    }

    fn name(&self) -> &'static str {
        "PassthroughHandler"
    }
}

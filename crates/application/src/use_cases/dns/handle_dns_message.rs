use crate::ports::{DnsHandler, DnsLogger, DnsResolver};
use crate::services::message_codec;
use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use netdns_domain::{Protocol, RequestContext};
use std::sync::Arc;
use tracing::debug;

/// What to send when the resolver fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveErrorPolicy {
    /// No reply; the client retries or times out.
    #[default]
    Drop,

    /// Answer SERVFAIL with the question echoed.
    ServFail,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HandlerPolicy {
    /// Largest UDP reply in bytes, 0 for no limit.
    pub udp_max_payload: usize,

    pub on_resolve_error: ResolveErrorPolicy,
}

/// Decode, resolve, encode and (for UDP) truncate one message.
pub struct HandleDnsMessageUseCase {
    resolver: Arc<dyn DnsResolver>,
    logger: Arc<dyn DnsLogger>,
    policy: HandlerPolicy,
}

impl HandleDnsMessageUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, logger: Arc<dyn DnsLogger>) -> Self {
        Self {
            resolver,
            logger,
            policy: HandlerPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: HandlerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> HandlerPolicy {
        self.policy
    }

    /// Returns the encoded reply, or `None` when the message is dropped.
    pub async fn execute(&self, raw: &[u8], ctx: &RequestContext) -> Option<Vec<u8>> {
        let request = match message_codec::decode(raw) {
            Ok(request) => request,
            Err(e) => {
                self.logger.log_error(ctx, &e);
                return None;
            }
        };

        self.logger.log_request(ctx, &request);
        self.logger.log_data(ctx, &request);

        let reply = match self.resolver.resolve(&request, ctx).await {
            Ok(reply) => reply,
            Err(e) => {
                self.logger.log_error(ctx, &e);
                match self.policy.on_resolve_error {
                    ResolveErrorPolicy::Drop => {
                        debug!(client = %ctx.client, id = request.id(), "Dropping unresolved query");
                        return None;
                    }
                    ResolveErrorPolicy::ServFail => {
                        message_codec::reply_with_code(&request, ResponseCode::ServFail)
                    }
                }
            }
        };

        self.logger.log_reply(ctx, &reply);
        self.logger.log_data(ctx, &reply);

        let bytes = match message_codec::encode(&reply) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.logger.log_error(ctx, &e);
                return None;
            }
        };

        let limit = self.policy.udp_max_payload;
        if ctx.protocol != Protocol::Udp || limit == 0 || bytes.len() <= limit {
            return Some(bytes);
        }

        match message_codec::truncate(&reply, limit) {
            Ok((truncated, truncated_bytes)) => {
                debug!(
                    client = %ctx.client,
                    full_len = bytes.len(),
                    truncated_len = truncated_bytes.len(),
                    limit,
                    "Reply truncated"
                );
                self.logger.log_truncated(ctx, &truncated);
                Some(truncated_bytes)
            }
            Err(e) => {
                self.logger.log_error(ctx, &e);
                None
            }
        }
    }
}

#[async_trait]
impl DnsHandler for HandleDnsMessageUseCase {
    async fn handle_message(&self, raw: &[u8], ctx: &RequestContext) -> Option<Vec<u8>> {
        self.execute(raw, ctx).await
    }

    fn name(&self) -> &'static str {
        "DnsHandler"
    }
}

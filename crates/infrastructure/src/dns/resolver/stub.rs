use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use netdns_application::ports::DnsResolver;
use netdns_application::services::message_codec;
use netdns_domain::{DomainError, RequestContext};

/// Answers every query with NXDOMAIN and the question echoed.
///
/// Useful as a sink for testing clients and as the smallest resolver that
/// exercises the full listener path.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubResolver;

impl StubResolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DnsResolver for StubResolver {
    async fn resolve(
        &self,
        request: &Message,
        _ctx: &RequestContext,
    ) -> Result<Message, DomainError> {
        Ok(message_codec::reply_with_code(request, ResponseCode::NXDomain))
    }

    fn name(&self) -> &'static str {
        "StubResolver"
    }
}

use async_trait::async_trait;
use hickory_proto::op::Message;
use netdns_domain::{DomainError, RequestContext};

/// Computes the reply for a decoded request.
///
/// Must not mutate the request. An `Err` means "no answer": the handler logs
/// it and drops the query (or answers SERVFAIL when configured to).
/// Implementations are shared across concurrent requests.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, request: &Message, ctx: &RequestContext)
        -> Result<Message, DomainError>;

    /// Short name used in log prefixes.
    fn name(&self) -> &'static str;
}

use hickory_proto::op::Message;
use netdns_domain::{DomainError, RequestContext};

/// Hook points fired while a message moves through the server.
///
/// Every hook is invoked unconditionally; implementations decide which ones
/// produce output. Hooks return nothing so logging cannot fail a request.
pub trait DnsLogger: Send + Sync {
    /// Raw bytes read from the client.
    fn log_recv(&self, ctx: &RequestContext, data: &[u8]);

    /// Raw bytes written back to the client.
    fn log_send(&self, ctx: &RequestContext, data: &[u8]);

    fn log_request(&self, ctx: &RequestContext, request: &Message);

    fn log_reply(&self, ctx: &RequestContext, reply: &Message);

    /// The reply was too large for UDP and was replaced by `reply`.
    fn log_truncated(&self, ctx: &RequestContext, reply: &Message);

    fn log_error(&self, ctx: &RequestContext, error: &DomainError);

    /// Full dump of a request or reply.
    fn log_data(&self, ctx: &RequestContext, message: &Message);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl DnsLogger for NoopLogger {
    fn log_recv(&self, _ctx: &RequestContext, _data: &[u8]) {}
    fn log_send(&self, _ctx: &RequestContext, _data: &[u8]) {}
    fn log_request(&self, _ctx: &RequestContext, _request: &Message) {}
    fn log_reply(&self, _ctx: &RequestContext, _reply: &Message) {}
    fn log_truncated(&self, _ctx: &RequestContext, _reply: &Message) {}
    fn log_error(&self, _ctx: &RequestContext, _error: &DomainError) {}
    fn log_data(&self, _ctx: &RequestContext, _message: &Message) {}
}

use async_trait::async_trait;
use netdns_domain::RequestContext;

/// Turns one de-framed request into the bytes to send back.
///
/// `None` means the message is dropped without a reply. Implementations log
/// their own failures; nothing is surfaced to the transport.
#[async_trait]
pub trait DnsHandler: Send + Sync {
    async fn handle_message(&self, raw: &[u8], ctx: &RequestContext) -> Option<Vec<u8>>;

    /// Short name used in log prefixes.
    fn name(&self) -> &'static str;
}

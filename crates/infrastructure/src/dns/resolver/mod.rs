pub mod proxy;
pub mod stub;

pub use proxy::ProxyResolver;
pub use stub::StubResolver;

use async_trait::async_trait;
use hickory_proto::op::Message;
use netdns_application::ports::DnsResolver;
use netdns_domain::{Config, DomainError, RequestContext, ResolverKind};
use tracing::info;

/// The resolvers the server can be started with.
pub enum Resolver {
    Stub(StubResolver),
    Proxy(ProxyResolver),
}

#[async_trait]
impl DnsResolver for Resolver {
    async fn resolve(
        &self,
        request: &Message,
        ctx: &RequestContext,
    ) -> Result<Message, DomainError> {
        match self {
            Self::Stub(r) => r.resolve(request, ctx).await,
            Self::Proxy(r) => r.resolve(request, ctx).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Stub(r) => r.name(),
            Self::Proxy(r) => r.name(),
        }
    }
}

pub fn create_resolver(config: &Config) -> Result<Resolver, DomainError> {
    match config.dns.resolver {
        ResolverKind::Stub => {
            info!("Using stub resolver (every query answered NXDOMAIN)");
            Ok(Resolver::Stub(StubResolver::new()))
        }
        ResolverKind::Proxy => {
            let upstream = config
                .upstream_addr()
                .map_err(|e| DomainError::InvalidUpstream(e.to_string()))?;

            info!(
                upstream = %upstream,
                timeout_ms = config.dns.query_timeout,
                "Using proxy resolver"
            );

            Ok(Resolver::Proxy(ProxyResolver::new(
                upstream,
                config.query_timeout(),
            )))
        }
    }
}

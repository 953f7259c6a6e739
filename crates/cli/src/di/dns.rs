use netdns_application::ports::{DnsHandler, DnsLogger, DnsResolver};
use netdns_application::use_cases::{HandleDnsMessageUseCase, HandlerPolicy, ResolveErrorPolicy};
use netdns_domain::Config;
use netdns_infrastructure::dns::{create_resolver, EventLogger, PassthroughHandler};
use std::sync::Arc;
use tracing::info;

const PASSTHROUGH_HANDLER: &str = "PassthroughHandler";
const PASSTHROUGH_UPSTREAM: &str = "Upstream";

pub struct DnsServices {
    pub handler: Arc<dyn DnsHandler>,
    pub logger: Arc<dyn DnsLogger>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        if config.server.passthrough {
            Self::passthrough(config)
        } else {
            Self::resolving(config)
        }
    }

    fn passthrough(config: &Config) -> anyhow::Result<Self> {
        let upstream = config.upstream_addr()?;
        info!(upstream = %upstream, "Passthrough mode: relaying raw messages");

        let logger: Arc<dyn DnsLogger> = Arc::new(EventLogger::from_config(
            config,
            PASSTHROUGH_HANDLER,
            PASSTHROUGH_UPSTREAM,
        ));
        let handler: Arc<dyn DnsHandler> = Arc::new(PassthroughHandler::new(
            upstream,
            config.query_timeout(),
            logger.clone(),
        ));

        Ok(Self { handler, logger })
    }

    fn resolving(config: &Config) -> anyhow::Result<Self> {
        let resolver = Arc::new(create_resolver(config)?);

        let logger: Arc<dyn DnsLogger> = Arc::new(EventLogger::from_config(
            config,
            "DnsHandler",
            resolver.name(),
        ));

        let policy = HandlerPolicy {
            udp_max_payload: config.dns.udp_max_payload,
            on_resolve_error: if config.dns.servfail_on_error {
                ResolveErrorPolicy::ServFail
            } else {
                ResolveErrorPolicy::Drop
            },
        };

        info!(
            resolver = resolver.name(),
            udp_max_payload = policy.udp_max_payload,
            on_resolve_error = ?policy.on_resolve_error,
            hooks = %config.logging.log_hooks(),
            "DNS handler ready"
        );

        let handler: Arc<dyn DnsHandler> =
            Arc::new(HandleDnsMessageUseCase::new(resolver, logger.clone()).with_policy(policy));

        Ok(Self { handler, logger })
    }
}

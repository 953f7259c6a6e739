mod dns_handler;
mod dns_logger;
mod dns_resolver;

pub use dns_handler::DnsHandler;
pub use dns_logger::{DnsLogger, NoopLogger};
pub use dns_resolver::DnsResolver;

// Re-export for convenience
pub use hickory_proto::op::Message;
pub use netdns_domain::RequestContext;

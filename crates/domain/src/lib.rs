//! netdns domain layer
pub mod config;
pub mod dns_protocol;
pub mod dns_request;
pub mod errors;
pub mod log_hooks;

pub use config::{CliOverrides, Config, ConfigError, ResolverKind};
pub use dns_protocol::{Protocol, UpstreamAddr};
pub use dns_request::RequestContext;
pub use errors::DomainError;
pub use log_hooks::{LogHook, LogHooks};

mod dns;
mod errors;
mod logging;
mod root;
mod server;

pub use dns::{DnsConfig, ResolverKind};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::dns::{DnsConfig, ResolverKind};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::dns_protocol::UpstreamAddr;

/// Smallest truncation limit that can still hold a DNS header.
const MIN_UDP_PAYLOAD: usize = 12;

/// Main configuration structure for netdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (address, port, protocols)
    #[serde(default)]
    pub server: ServerConfig,

    /// Resolution configuration
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. netdns.toml in current directory
    /// 3. /etc/netdns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if overrides.tcp {
            self.server.tcp = true;
        }
        if overrides.passthrough {
            self.server.passthrough = true;
        }
        if let Some(upstream) = overrides.upstream {
            self.dns.upstream = upstream;
        }
        if let Some(resolver) = overrides.resolver {
            self.dns.resolver = resolver;
        }
        if let Some(timeout) = overrides.query_timeout {
            self.dns.query_timeout = timeout;
        }
        if let Some(limit) = overrides.udp_max_payload {
            self.dns.udp_max_payload = limit;
        }
        if overrides.servfail_on_error {
            self.dns.servfail_on_error = true;
        }
        if let Some(hooks) = overrides.log_hooks {
            self.logging.hooks = hooks;
        }
        if overrides.log_prefix {
            self.logging.prefix = true;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            )));
        }

        if self.server.read_timeout == 0 || self.server.write_timeout == 0 {
            return Err(ConfigError::Validation(
                "Read and write timeouts must be greater than 0".to_string(),
            ));
        }

        if self.dns.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }

        self.upstream_addr()?;

        if self.dns.udp_max_payload != 0 && self.dns.udp_max_payload < MIN_UDP_PAYLOAD {
            return Err(ConfigError::Validation(format!(
                "udp_max_payload must be 0 or at least {} bytes, got {}",
                MIN_UDP_PAYLOAD, self.dns.udp_max_payload
            )));
        }

        Ok(())
    }

    /// Parsed upstream address
    pub fn upstream_addr(&self) -> Result<UpstreamAddr, ConfigError> {
        self.dns
            .upstream
            .parse()
            .map_err(|e: String| ConfigError::Validation(format!("Invalid upstream: {}", e)))
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.dns.query_timeout)
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new("netdns.toml").exists() {
            Some("netdns.toml".to_string())
        } else if std::path::Path::new("/etc/netdns/config.toml").exists() {
            Some("/etc/netdns/config.toml".to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub tcp: bool,
    pub passthrough: bool,
    pub upstream: Option<String>,
    pub resolver: Option<ResolverKind>,
    pub query_timeout: Option<u64>,
    pub udp_max_payload: Option<usize>,
    pub servfail_on_error: bool,
    pub log_hooks: Option<String>,
    pub log_prefix: bool,
    pub log_level: Option<String>,
}

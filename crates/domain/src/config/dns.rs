use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which resolver answers decoded queries.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
    /// Forward to the configured upstream.
    #[default]
    Proxy,

    /// Answer everything with NXDOMAIN.
    Stub,
}

impl ResolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proxy => "proxy",
            Self::Stub => "stub",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "stub" => Ok(Self::Stub),
            other => Err(format!(
                "Unknown resolver '{}'. Expected 'proxy' or 'stub'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    #[serde(default)]
    pub resolver: ResolverKind,

    #[serde(default = "default_upstream")]
    pub upstream: String,

    /// Upstream round trip budget in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Largest UDP reply in bytes before truncation, 0 for no limit.
    #[serde(default)]
    pub udp_max_payload: usize,

    /// Answer SERVFAIL instead of dropping when resolution fails.
    #[serde(default)]
    pub servfail_on_error: bool,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverKind::default(),
            upstream: default_upstream(),
            query_timeout: default_query_timeout(),
            udp_max_payload: 0,
            servfail_on_error: false,
        }
    }
}

fn default_upstream() -> String {
    "8.8.8.8:53".to_string()
}

fn default_query_timeout() -> u64 {
    5000
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Also listen on TCP (same address and port).
    #[serde(default)]
    pub tcp: bool,

    /// Relay raw bytes upstream instead of decode/resolve/encode.
    #[serde(default)]
    pub passthrough: bool,

    /// Milliseconds allowed for reading one TCP request frame.
    #[serde(default = "default_io_timeout")]
    pub read_timeout: u64,

    /// Milliseconds allowed for writing one reply.
    #[serde(default = "default_io_timeout")]
    pub write_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            tcp: false,
            passthrough: false,
            read_timeout: default_io_timeout(),
            write_timeout: default_io_timeout(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_io_timeout() -> u64 {
    10_000
}

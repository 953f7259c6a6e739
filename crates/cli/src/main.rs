use clap::Parser;
use netdns_domain::{CliOverrides, ResolverKind};
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "netdns")]
#[command(version)]
#[command(about = "netdns - UDP/TCP DNS listener with pluggable resolvers")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Listen address
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Upstream server for the proxy resolver and passthrough (HOST[:PORT])
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Also listen on TCP
    #[arg(long)]
    tcp: bool,

    /// Relay raw bytes to the upstream without decoding
    #[arg(long)]
    passthrough: bool,

    /// Resolver to use (proxy, stub)
    #[arg(long)]
    resolver: Option<ResolverKind>,

    /// Log hooks, e.g. "+data,-error" or "request,reply"
    #[arg(long, value_name = "HOOKS", allow_hyphen_values = true)]
    log: Option<String>,

    /// Prefix hook lines with timestamp and handler/resolver names
    #[arg(long)]
    log_prefix: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Truncate UDP replies larger than this many bytes (0 disables)
    #[arg(long, value_name = "BYTES")]
    udplen: Option<usize>,

    /// Upstream timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Answer SERVFAIL instead of dropping when resolution fails
    #[arg(long)]
    servfail: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.port,
        bind_address: cli.address,
        tcp: cli.tcp,
        passthrough: cli.passthrough,
        upstream: cli.upstream,
        resolver: cli.resolver,
        query_timeout: cli.timeout,
        udp_max_payload: cli.udplen,
        servfail_on_error: cli.servfail,
        log_hooks: cli.log,
        log_prefix: cli.log_prefix,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting netdns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let server = server::start_dns_server(&config, &dns_services).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop().await;

    info!("Server shutdown complete");
    Ok(())
}

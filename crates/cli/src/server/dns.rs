use crate::di::DnsServices;
use netdns_domain::Config;
use netdns_infrastructure::dns::{DnsServer, ListenerOptions, RunningServer};
use tracing::{error, info};

pub async fn start_dns_server(
    config: &Config,
    services: &DnsServices,
) -> anyhow::Result<RunningServer> {
    let options = ListenerOptions::from_config(config)?;

    info!(
        bind_address = %options.addr,
        tcp = options.tcp,
        "Starting DNS server"
    );

    let server = DnsServer::bind(options, services.handler.clone(), services.logger.clone())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to start DNS server");
            e
        })?;

    let running = server.spawn();

    match running.tcp_addr() {
        Some(tcp) => info!("DNS server ready on udp {} and tcp {}", running.udp_addr(), tcp),
        None => info!("DNS server ready on udp {}", running.udp_addr()),
    }

    Ok(running)
}

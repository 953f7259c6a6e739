pub mod socket;
mod tcp;
mod udp;

use netdns_application::ports::{DnsHandler, DnsLogger};
use netdns_domain::{Config, DomainError, Protocol, RequestContext};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to listen.
#[derive(Debug, Clone, Copy)]
pub struct ListenerOptions {
    pub addr: SocketAddr,

    /// Also accept TCP on the same port.
    pub tcp: bool,

    /// Per-connection TCP read deadline.
    pub read_timeout: Duration,

    /// Deadline for writing a reply, both protocols.
    pub write_timeout: Duration,
}

impl ListenerOptions {
    pub fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            tcp: false,
            read_timeout: DEFAULT_IO_TIMEOUT,
            write_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_tcp(mut self, tcp: bool) -> Self {
        self.tcp = tcp;
        self
    }

    pub fn with_timeouts(mut self, read_timeout: Duration, write_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self.write_timeout = write_timeout;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let ip: IpAddr = config
            .server
            .bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| DomainError::Bind {
                protocol: Protocol::Udp,
                addr: config.server.bind_address.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self::new(SocketAddr::new(ip, config.server.dns_port))
            .with_tcp(config.server.tcp)
            .with_timeouts(
                Duration::from_millis(config.server.read_timeout),
                Duration::from_millis(config.server.write_timeout),
            ))
    }
}

/// Shared by every listener task.
pub(crate) struct Dispatcher {
    handler: Arc<dyn DnsHandler>,
    logger: Arc<dyn DnsLogger>,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl Dispatcher {
    async fn dispatch(&self, raw: &[u8], ctx: &RequestContext) -> Option<Vec<u8>> {
        self.logger.log_recv(ctx, raw);
        self.handler.handle_message(raw, ctx).await
    }
}

/// Cloneable handle that asks a server to stop accepting work.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    token: CancellationToken,
}

impl ShutdownHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Bound listeners, ready to serve.
pub struct DnsServer {
    udp: UdpSocket,
    tcp: Option<TcpListener>,
    udp_addr: SocketAddr,
    tcp_addr: Option<SocketAddr>,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
    tracker: TaskTracker,
}

impl DnsServer {
    /// Bind UDP, then TCP on the same port when enabled.
    ///
    /// With port 0 the TCP listener takes the port the OS picked for UDP.
    /// If TCP fails the UDP socket is released before returning.
    pub async fn bind(
        options: ListenerOptions,
        handler: Arc<dyn DnsHandler>,
        logger: Arc<dyn DnsLogger>,
    ) -> Result<Self, DomainError> {
        let udp = socket::create_udp_socket(options.addr)
            .map_err(|e| bind_error(Protocol::Udp, options.addr, e))?;
        let udp_addr = udp
            .local_addr()
            .map_err(|e| bind_error(Protocol::Udp, options.addr, e))?;

        let tcp = if options.tcp {
            let listener = socket::create_tcp_listener(udp_addr)
                .map_err(|e| bind_error(Protocol::Tcp, udp_addr, e))?;
            Some(listener)
        } else {
            None
        };
        let tcp_addr = match &tcp {
            Some(listener) => Some(
                listener
                    .local_addr()
                    .map_err(|e| bind_error(Protocol::Tcp, udp_addr, e))?,
            ),
            None => None,
        };

        info!(
            udp = %udp_addr,
            tcp = ?tcp_addr,
            handler = handler.name(),
            "DNS listeners bound"
        );

        Ok(Self {
            udp,
            tcp,
            udp_addr,
            tcp_addr,
            dispatcher: Arc::new(Dispatcher {
                handler,
                logger,
                read_timeout: options.read_timeout,
                write_timeout: options.write_timeout,
            }),
            shutdown: CancellationToken::new(),
            tracker: TaskTracker::new(),
        })
    }

    pub fn udp_addr(&self) -> SocketAddr {
        self.udp_addr
    }

    pub fn tcp_addr(&self) -> Option<SocketAddr> {
        self.tcp_addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            token: self.shutdown.clone(),
        }
    }

    /// Serve until stopped, then wait for in-flight requests.
    pub async fn serve(self) {
        let udp_loop = udp::serve_udp(
            Arc::new(self.udp),
            self.dispatcher.clone(),
            self.shutdown.clone(),
            self.tracker.clone(),
        );

        match self.tcp {
            Some(listener) => {
                let tcp_loop = tcp::serve_tcp(
                    listener,
                    self.dispatcher.clone(),
                    self.shutdown.clone(),
                    self.tracker.clone(),
                );
                tokio::join!(udp_loop, tcp_loop);
            }
            None => udp_loop.await,
        }

        self.tracker.close();
        self.tracker.wait().await;

        info!(udp = %self.udp_addr, "DNS server stopped");
    }

    /// Serve on a background task.
    pub fn spawn(self) -> RunningServer {
        let udp_addr = self.udp_addr;
        let tcp_addr = self.tcp_addr;
        let shutdown = self.shutdown_handle();
        let task = tokio::spawn(self.serve());

        RunningServer {
            udp_addr,
            tcp_addr,
            shutdown,
            task,
        }
    }
}

/// A server running on a background task.
pub struct RunningServer {
    udp_addr: SocketAddr,
    tcp_addr: Option<SocketAddr>,
    shutdown: ShutdownHandle,
    task: JoinHandle<()>,
}

impl RunningServer {
    pub fn udp_addr(&self) -> SocketAddr {
        self.udp_addr
    }

    pub fn tcp_addr(&self) -> Option<SocketAddr> {
        self.tcp_addr
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Stop listening and wait until every in-flight request has finished.
    pub async fn stop(self) {
        self.shutdown.stop();
        report_exit(self.task.await);
    }
}

/// Returns false when the serve task panicked or was aborted.
fn report_exit(result: Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "DNS server task failed");
            false
        }
    }
}

fn bind_error(protocol: Protocol, addr: SocketAddr, e: std::io::Error) -> DomainError {
    DomainError::Bind {
        protocol,
        addr: addr.to_string(),
        reason: e.to_string(),
    }
}

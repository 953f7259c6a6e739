#![allow(dead_code)]
use netdns_infrastructure::dns::transport::tcp::{read_with_length_prefix, write_with_length_prefix};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, UdpSocket};
use tokio_util::sync::CancellationToken;

/// Upstream stand-in answering every query with one A record, over UDP and
/// TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown: CancellationToken,
}

pub const MOCK_ANSWER: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

impl MockDnsServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let queries = Arc::new(AtomicUsize::new(0));
        let shutdown = CancellationToken::new();

        let udp_queries = queries.clone();
        let udp_shutdown = shutdown.clone();
        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = udp_shutdown.cancelled() => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_queries.fetch_add(1, Ordering::SeqCst);
                            let response = Self::build_mock_response(&buf[..len]);
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        let tcp_queries = queries.clone();
        let tcp_shutdown = shutdown.clone();
        tokio::spawn(async move {
            loop {
                let (mut stream, _) = tokio::select! {
                    _ = tcp_shutdown.cancelled() => break,
                    result = listener.accept() => match result {
                        Ok(accepted) => accepted,
                        Err(_) => continue,
                    },
                };
                let tcp_queries = tcp_queries.clone();
                tokio::spawn(async move {
                    if let Ok(query) = read_with_length_prefix(&mut stream).await {
                        tcp_queries.fetch_add(1, Ordering::SeqCst);
                        let response = Self::build_mock_response(&query);
                        let _ = write_with_length_prefix(&mut stream, &response).await;
                    }
                });
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Header copied from the query with QR/RD/RA set, question echoed and
    /// one A answer pointing back at the question name.
    pub fn build_mock_response(query: &[u8]) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);

        response.extend_from_slice(&query[0..2]);
        response.push(0x81);
        response.push(0x80);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        response.extend_from_slice(&[
            0xc0, 0x0c, // name pointer
            0x00, 0x01, // A
            0x00, 0x01, // IN
            0x00, 0x00, 0x00, 0x3c,
            0x00, 0x04,
        ]);
        response.extend_from_slice(&MOCK_ANSWER.octets());

        response
    }

    pub fn shutdown(self) {
        self.shutdown.cancel();
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

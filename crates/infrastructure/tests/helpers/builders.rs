#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use netdns_application::ports::{DnsHandler, DnsLogger};
use netdns_application::services::message_codec;
use netdns_application::use_cases::{HandleDnsMessageUseCase, HandlerPolicy};
use netdns_domain::{DomainError, RequestContext};
use netdns_infrastructure::dns::{DnsServer, ListenerOptions, RunningServer, StubResolver};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

pub const REPLY_WAIT: Duration = Duration::from_secs(2);

pub fn query_message(id: u16, domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    message
}

pub fn query_bytes(id: u16, domain: &str) -> Vec<u8> {
    message_codec::encode(&query_message(id, domain, RecordType::A)).unwrap()
}

pub fn loopback() -> ListenerOptions {
    ListenerOptions::new("127.0.0.1:0".parse().unwrap())
}

/// Counts hook calls; keeps error messages for assertions.
#[derive(Default)]
pub struct CountingLogger {
    recv: Mutex<usize>,
    send: Mutex<usize>,
    truncated: Mutex<usize>,
    errors: Mutex<Vec<String>>,
}

impl CountingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recv(&self) -> usize {
        *self.recv.lock().unwrap()
    }

    pub fn send(&self) -> usize {
        *self.send.lock().unwrap()
    }

    pub fn truncated(&self) -> usize {
        *self.truncated.lock().unwrap()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl DnsLogger for CountingLogger {
    fn log_recv(&self, _ctx: &RequestContext, _data: &[u8]) {
        *self.recv.lock().unwrap() += 1;
    }

    fn log_send(&self, _ctx: &RequestContext, _data: &[u8]) {
        *self.send.lock().unwrap() += 1;
    }

    fn log_request(&self, _ctx: &RequestContext, _request: &Message) {}

    fn log_reply(&self, _ctx: &RequestContext, _reply: &Message) {}

    fn log_truncated(&self, _ctx: &RequestContext, _reply: &Message) {
        *self.truncated.lock().unwrap() += 1;
    }

    fn log_error(&self, _ctx: &RequestContext, error: &DomainError) {
        self.errors.lock().unwrap().push(error.to_string());
    }

    fn log_data(&self, _ctx: &RequestContext, _message: &Message) {}
}

pub fn stub_handler(logger: Arc<CountingLogger>, policy: HandlerPolicy) -> Arc<dyn DnsHandler> {
    Arc::new(HandleDnsMessageUseCase::new(Arc::new(StubResolver::new()), logger).with_policy(policy))
}

/// Stub resolver server on an ephemeral loopback port.
pub async fn start_stub_server(
    options: ListenerOptions,
    logger: Arc<CountingLogger>,
    policy: HandlerPolicy,
) -> RunningServer {
    let handler = stub_handler(logger.clone(), policy);
    DnsServer::bind(options, handler, logger)
        .await
        .expect("bind loopback server")
        .spawn()
}

pub async fn udp_exchange(server: SocketAddr, payload: &[u8]) -> Option<Vec<u8>> {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.send_to(payload, server).await.unwrap();

    let mut buf = vec![0u8; 8192];
    match tokio::time::timeout(REPLY_WAIT, socket.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

pub async fn tcp_exchange(server: SocketAddr, payload: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(server).await.unwrap();
    let mut framed = (payload.len() as u16).to_be_bytes().to_vec();
    framed.extend_from_slice(payload);
    stream.write_all(&framed).await.unwrap();

    read_tcp_reply(&mut stream).await
}

pub async fn read_tcp_reply(stream: &mut TcpStream) -> Vec<u8> {
    let mut len_buf = [0u8; 2];
    tokio::time::timeout(REPLY_WAIT, stream.read_exact(&mut len_buf))
        .await
        .expect("reply length in time")
        .unwrap();

    let mut reply = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut reply).await.unwrap();
    reply
}

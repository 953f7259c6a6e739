use super::builders::answer_reply;
use async_trait::async_trait;
use hickory_proto::op::{Message, ResponseCode};
use netdns_application::ports::{DnsLogger, DnsResolver};
use netdns_application::services::message_codec;
use netdns_domain::{DomainError, RequestContext};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

pub struct MockDnsResolver {
    answers: AtomicUsize,
    should_fail: AtomicBool,
    calls: AtomicUsize,
}

impl MockDnsResolver {
    /// Answers NXDOMAIN until configured otherwise.
    pub fn new() -> Self {
        Self {
            answers: AtomicUsize::new(0),
            should_fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_answers(count: usize) -> Self {
        let resolver = Self::new();
        resolver.answers.store(count, Ordering::SeqCst);
        resolver
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The reply this mock produces for `request`.
    pub fn expected_reply(&self, request: &Message) -> Message {
        match self.answers.load(Ordering::SeqCst) {
            0 => message_codec::reply_with_code(request, ResponseCode::NXDomain),
            n => answer_reply(request, n),
        }
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        request: &Message,
        _ctx: &RequestContext,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Upstream {
                server: "mock".to_string(),
                reason: "Mock resolver failed".to_string(),
            });
        }

        Ok(self.expected_reply(request))
    }

    fn name(&self) -> &'static str {
        "MockDnsResolver"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Recv(usize),
    Send(usize),
    Request(u16),
    Reply(u16),
    Truncated(u16),
    Error(String),
    Data(u16),
}

/// Records every hook invocation.
#[derive(Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&LogEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| matches(e)).count()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                LogEvent::Error(msg) => Some(msg),
                _ => None,
            })
            .collect()
    }

    pub fn truncations(&self) -> usize {
        self.count(|e| matches!(e, LogEvent::Truncated(_)))
    }

    fn push(&self, event: LogEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl DnsLogger for RecordingLogger {
    fn log_recv(&self, _ctx: &RequestContext, data: &[u8]) {
        self.push(LogEvent::Recv(data.len()));
    }

    fn log_send(&self, _ctx: &RequestContext, data: &[u8]) {
        self.push(LogEvent::Send(data.len()));
    }

    fn log_request(&self, _ctx: &RequestContext, request: &Message) {
        self.push(LogEvent::Request(request.id()));
    }

    fn log_reply(&self, _ctx: &RequestContext, reply: &Message) {
        self.push(LogEvent::Reply(reply.id()));
    }

    fn log_truncated(&self, _ctx: &RequestContext, reply: &Message) {
        self.push(LogEvent::Truncated(reply.id()));
    }

    fn log_error(&self, _ctx: &RequestContext, error: &DomainError) {
        self.push(LogEvent::Error(error.to_string()));
    }

    fn log_data(&self, _ctx: &RequestContext, message: &Message) {
        self.push(LogEvent::Data(message.id()));
    }
}

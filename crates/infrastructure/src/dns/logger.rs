use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use netdns_application::ports::DnsLogger;
use netdns_domain::{Config, DomainError, LogHook, LogHooks, RequestContext};
use std::fmt::Write;
use tracing::{info, warn};

/// Target carrying hook lines, kept apart from diagnostic logs.
pub const EVENTS_TARGET: &str = "netdns::events";

/// Hook logger writing one line per enabled event to [`EVENTS_TARGET`].
pub struct EventLogger {
    hooks: LogHooks,
    prefix: bool,
    handler_name: &'static str,
    resolver_name: &'static str,
}

impl EventLogger {
    pub fn new(hooks: LogHooks) -> Self {
        Self {
            hooks,
            prefix: false,
            handler_name: "DnsHandler",
            resolver_name: "Resolver",
        }
    }

    /// Start every line with a timestamp and `[handler:resolver]`.
    pub fn with_prefix(mut self, handler_name: &'static str, resolver_name: &'static str) -> Self {
        self.prefix = true;
        self.handler_name = handler_name;
        self.resolver_name = resolver_name;
        self
    }

    pub fn from_config(
        config: &Config,
        handler_name: &'static str,
        resolver_name: &'static str,
    ) -> Self {
        let logger = Self::new(config.logging.log_hooks());
        if config.logging.prefix {
            logger.with_prefix(handler_name, resolver_name)
        } else {
            logger
        }
    }

    pub fn hooks(&self) -> LogHooks {
        self.hooks
    }

    fn line_prefix(&self) -> String {
        if !self.prefix {
            return String::new();
        }
        format!(
            "{} [{}:{}] ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.handler_name,
            self.resolver_name
        )
    }

    fn emit(&self, hook: LogHook, line: impl FnOnce() -> String) {
        if !self.hooks.contains(hook) {
            return;
        }
        let prefix = self.line_prefix();
        let line = line();
        match hook {
            LogHook::Error => warn!(target: EVENTS_TARGET, "{}{}", prefix, line),
            _ => info!(target: EVENTS_TARGET, "{}{}", prefix, line),
        }
    }
}

impl DnsLogger for EventLogger {
    fn log_recv(&self, ctx: &RequestContext, data: &[u8]) {
        self.emit(LogHook::Recv, || format_bytes("Received", ctx, data));
    }

    fn log_send(&self, ctx: &RequestContext, data: &[u8]) {
        self.emit(LogHook::Send, || format_bytes("Sent", ctx, data));
    }

    fn log_request(&self, ctx: &RequestContext, request: &Message) {
        self.emit(LogHook::Request, || format_request(ctx, request));
    }

    fn log_reply(&self, ctx: &RequestContext, reply: &Message) {
        self.emit(LogHook::Reply, || format_reply("Reply", ctx, reply));
    }

    fn log_truncated(&self, ctx: &RequestContext, reply: &Message) {
        self.emit(LogHook::Truncated, || {
            format_reply("Truncated Reply", ctx, reply)
        });
    }

    fn log_error(&self, ctx: &RequestContext, error: &DomainError) {
        self.emit(LogHook::Error, || format_error(ctx, error));
    }

    fn log_data(&self, _ctx: &RequestContext, message: &Message) {
        self.emit(LogHook::Data, || format_data(message));
    }
}

fn peer(ctx: &RequestContext) -> String {
    format!("[{}:{}] ({})", ctx.client.ip(), ctx.client.port(), ctx.protocol)
}

fn question(message: &Message) -> String {
    match message.queries().first() {
        Some(query) => format!("'{}' ({})", query.name(), query.query_type()),
        None => "'' (-)".to_string(),
    }
}

fn record_types(records: &[Record]) -> String {
    records
        .iter()
        .map(|record| record.record_type().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn format_bytes(label: &str, ctx: &RequestContext, data: &[u8]) -> String {
    format!("{}: {} {} : {}", label, peer(ctx), data.len(), hex(data))
}

pub(crate) fn format_request(ctx: &RequestContext, request: &Message) -> String {
    format!("Request: {} / {}", peer(ctx), question(request))
}

pub(crate) fn format_reply(label: &str, ctx: &RequestContext, reply: &Message) -> String {
    format!(
        "{}: {} / {} / RRs: {}",
        label,
        peer(ctx),
        question(reply),
        record_types(reply.answers())
    )
}

pub(crate) fn format_error(ctx: &RequestContext, error: &DomainError) -> String {
    format!("Invalid Request: {} :: {}", peer(ctx), error)
}

/// Zone-style dump of a message, indented under the event line.
pub(crate) fn format_data(message: &Message) -> String {
    let mut out = String::new();

    let mut flags = Vec::new();
    if message.message_type() == hickory_proto::op::MessageType::Response {
        flags.push("qr");
    }
    if message.authoritative() {
        flags.push("aa");
    }
    if message.truncated() {
        flags.push("tc");
    }
    if message.recursion_desired() {
        flags.push("rd");
    }
    if message.recursion_available() {
        flags.push("ra");
    }

    let _ = write!(
        out,
        "\n    ;; ->>HEADER<<- opcode: {:?}, status: {:?}, id: {}",
        message.op_code(),
        message.response_code(),
        message.id()
    );
    let _ = write!(
        out,
        "\n    ;; flags: {}; QUERY: {}, ANSWER: {}, AUTHORITY: {}",
        flags.join(" "),
        message.queries().len(),
        message.answers().len(),
        message.name_servers().len()
    );

    if !message.queries().is_empty() {
        out.push_str("\n    ;; QUESTION SECTION:");
        for query in message.queries() {
            let _ = write!(
                out,
                "\n    ;{}\t{}\t{}",
                query.name(),
                query.query_class(),
                query.query_type()
            );
        }
    }

    for (title, records) in [
        ("ANSWER", message.answers()),
        ("AUTHORITY", message.name_servers()),
    ] {
        if records.is_empty() {
            continue;
        }
        let _ = write!(out, "\n    ;; {} SECTION:", title);
        for record in records {
            let _ = write!(out, "\n    {}", record);
        }
    }

    out
}

fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

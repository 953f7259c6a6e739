pub mod logger;
pub mod passthrough;
pub mod resolver;
pub mod server;
pub mod transport;

pub use logger::{EventLogger, EVENTS_TARGET};
pub use passthrough::PassthroughHandler;
pub use resolver::{create_resolver, ProxyResolver, Resolver, StubResolver};
pub use server::{DnsServer, ListenerOptions, RunningServer, ShutdownHandle};

pub mod dns;

pub use dns::{HandleDnsMessageUseCase, HandlerPolicy, ResolveErrorPolicy};

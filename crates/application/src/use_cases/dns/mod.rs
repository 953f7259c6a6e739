mod handle_dns_message;

pub use handle_dns_message::{HandleDnsMessageUseCase, HandlerPolicy, ResolveErrorPolicy};

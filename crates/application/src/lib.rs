//! netdns application layer: ports, message codec and the request pipeline.
pub mod ports;
pub mod services;
pub mod use_cases;

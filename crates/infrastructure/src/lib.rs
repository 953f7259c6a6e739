//! netdns infrastructure: sockets, upstream transports, resolvers and logging.
pub mod dns;

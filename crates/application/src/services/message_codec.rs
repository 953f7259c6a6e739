//! DNS message codec
//!
//! Wire-format parsing and serialization is delegated to `hickory-proto`;
//! this module only adds the reply and truncation rules the server applies.

use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use netdns_domain::DomainError;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;

/// Parse wire bytes into a message.
pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes).map_err(|e| DomainError::Decode(e.to_string()))
}

/// Serialize a message to wire bytes.
pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::Encode(e.to_string()))?;

    Ok(buf)
}

/// Build an empty reply to `request` carrying `code`.
///
/// Id, opcode and RD are copied from the request and the question section
/// is echoed unchanged. AA and RA are set.
pub fn reply_with_code(request: &Message, code: ResponseCode) -> Message {
    let mut reply = Message::new(request.id(), MessageType::Response, request.op_code());
    reply.set_recursion_desired(request.recursion_desired());
    reply.set_recursion_available(true);
    reply.set_authoritative(true);
    reply.set_response_code(code);
    reply.add_queries(request.queries().iter().cloned());
    reply
}

/// Shrink `reply` so that it fits in `limit` bytes.
///
/// The truncated form keeps the header flags and rcode, sets TC and drops
/// every resource record. The question is kept when it still fits, otherwise
/// only the header is sent. Returns the truncated message and its encoding.
pub fn truncate(reply: &Message, limit: usize) -> Result<(Message, Vec<u8>), DomainError> {
    let mut truncated = header_copy(reply);
    truncated.add_queries(reply.queries().iter().cloned());

    let bytes = encode(&truncated)?;
    if bytes.len() <= limit || reply.queries().is_empty() {
        return Ok((truncated, bytes));
    }

    let bare = header_copy(reply);
    let bytes = encode(&bare)?;
    Ok((bare, bytes))
}

fn header_copy(reply: &Message) -> Message {
    let mut copy = Message::new(reply.id(), reply.message_type(), reply.op_code());
    copy.set_authoritative(reply.authoritative());
    copy.set_recursion_desired(reply.recursion_desired());
    copy.set_recursion_available(reply.recursion_available());
    copy.set_response_code(reply.response_code());
    copy.set_truncated(true);
    copy
}

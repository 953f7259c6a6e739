use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use netdns_application::services::message_codec;
use netdns_domain::RequestContext;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

pub const CLIENT: &str = "192.168.1.100:40000";

pub fn udp_ctx() -> RequestContext {
    RequestContext::udp(CLIENT.parse::<SocketAddr>().unwrap())
}

pub fn tcp_ctx() -> RequestContext {
    RequestContext::tcp(CLIENT.parse::<SocketAddr>().unwrap())
}

pub fn query_message(domain: &str, record_type: RecordType) -> Message {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    message
}

pub fn query_bytes(domain: &str) -> Vec<u8> {
    message_codec::encode(&query_message(domain, RecordType::A)).unwrap()
}

/// Reply to `request` with `count` A records.
pub fn answer_reply(request: &Message, count: usize) -> Message {
    let mut reply = message_codec::reply_with_code(request, ResponseCode::NoError);
    let name = request
        .queries()
        .first()
        .map(|q| q.name().clone())
        .unwrap_or_else(Name::root);

    for i in 0..count {
        reply.add_answer(Record::from_rdata(
            name.clone(),
            300,
            RData::A(A(Ipv4Addr::new(10, 0, (i / 256) as u8, (i % 256) as u8))),
        ));
    }
    reply
}

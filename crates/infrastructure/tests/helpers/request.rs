#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, Record, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinDecoder, BinEncoder};
use hickory_proto::xfer::Protocol;
use hickory_server::authority::{MessageRequest, MessageResponse};
use hickory_server::server::{Request, ResponseHandler, ResponseInfo};
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Captures the serialized response so tests can parse it back into a `Message`.
#[derive(Clone)]
pub struct CapturingResponseHandler {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturingResponseHandler {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::with_capacity(512))),
        }
    }

    pub fn into_message(self) -> Message {
        let buf = self.buf.lock().unwrap();
        assert!(!buf.is_empty(), "no response was captured");
        Message::from_vec(&buf).expect("failed to parse captured DNS response")
    }
}

#[async_trait]
impl ResponseHandler for CapturingResponseHandler {
    async fn send_response<'a>(
        &mut self,
        response: MessageResponse<
            '_,
            'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
            impl Iterator<Item = &'a Record> + Send + 'a,
        >,
    ) -> io::Result<ResponseInfo> {
        let mut buf = self.buf.lock().unwrap();
        buf.clear();
        let mut encoder = BinEncoder::new(&mut *buf);
        encoder.set_max_size(u16::MAX);
        response
            .destructive_emit(&mut encoder)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}

pub fn query_message(name: &str, record_type: RecordType, id: u16) -> Message {
    let mut msg = Message::new();
    msg.set_id(id);
    msg.set_message_type(MessageType::Query);
    msg.set_op_code(OpCode::Query);
    msg.set_recursion_desired(true);
    let mut query = Query::new();
    query.set_name(Name::from_ascii(name).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);
    msg.add_query(query);
    msg
}

pub fn query_bytes(name: &str, record_type: RecordType, id: u16) -> Vec<u8> {
    query_message(name, record_type, id).to_vec().unwrap()
}

pub fn query_bytes_with_edns(name: &str, record_type: RecordType, id: u16, max_payload: u16) -> Vec<u8> {
    let mut msg = query_message(name, record_type, id);
    let mut edns = Edns::new();
    edns.set_max_payload(max_payload);
    msg.set_edns(edns);
    msg.to_vec().unwrap()
}

pub fn build_request_from_bytes(bytes: &[u8], src: &str, protocol: Protocol) -> Request {
    let mut decoder = BinDecoder::new(bytes);
    let message = MessageRequest::read(&mut decoder).expect("failed to parse MessageRequest");
    Request::new(message, src.parse::<SocketAddr>().unwrap(), protocol)
}

pub fn build_request(name: &str, record_type: RecordType, src: &str, id: u16) -> Request {
    build_request_from_bytes(&query_bytes(name, record_type, id), src, Protocol::Udp)
}

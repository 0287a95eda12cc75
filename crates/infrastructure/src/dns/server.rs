use crate::dns::{RecordTypeMapper, ResponseBuilder};
use answer_dns_application::{Resolution, ResolveQueryUseCase};
use answer_dns_domain::{DnsRequest, RecordData, TransportProtocol};
use hickory_proto::op::{Edns, Message, ResponseCode};
use hickory_proto::rr::{Name, Record};
use hickory_proto::xfer::Protocol;
use hickory_proto::ProtoError;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// hickory entry point: local answers, then forwarding, SERVFAIL otherwise.
pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
    answer_ttl: u32,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, answer_ttl: u32) -> Self {
        Self {
            use_case,
            answer_ttl,
        }
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let client_ip = request.src().ip();

        // Rejects zero or multiple questions.
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                warn!(client = %client_ip, error = %e, "Malformed query");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let question = request_info.query.original();
        let domain = question.name().to_ascii().to_ascii_lowercase();
        let record_type = RecordTypeMapper::from_hickory(question.query_type());
        let protocol = match request.protocol() {
            Protocol::Tcp => TransportProtocol::Tcp,
            _ => TransportProtocol::Udp,
        };

        let wire_query = match forward_message(request) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(client = %client_ip, error = %e, "Failed to encode query for forwarding");
                return send_error_response(request, &mut response_handle, ResponseCode::ServFail)
                    .await;
            }
        };

        let dns_request = DnsRequest::new(domain, record_type, client_ip, protocol);
        match self.use_case.execute(&dns_request, &wire_query).await {
            Ok(Resolution::Local(answer)) => {
                send_local_answer(
                    request,
                    question.name(),
                    &answer.records,
                    self.answer_ttl,
                    &mut response_handle,
                )
                .await
            }
            Ok(Resolution::Forwarded(forwarded)) => {
                relay_upstream_response(request, &forwarded.message, &mut response_handle).await
            }
            Err(_) => {
                send_error_response(request, &mut response_handle, ResponseCode::ServFail).await
            }
        }
    }
}

/// Re-encodes the client's message (header, question, EDNS) for an upstream.
fn forward_message(request: &Request) -> Result<Vec<u8>, ProtoError> {
    let mut message = Message::new();
    message.set_header(*request.header());
    message.add_queries(request.queries().iter().map(|q| q.original().clone()));
    if let Some(edns) = request.edns() {
        message.set_edns(edns.clone());
    }
    message.to_vec()
}

async fn send_local_answer<R: ResponseHandler>(
    request: &Request,
    owner: &Name,
    records: &[RecordData],
    ttl: u32,
    response_handle: &mut R,
) -> ResponseInfo {
    let answers: Vec<Record> = match ResponseBuilder::answer_records(owner, records, ttl) {
        Ok(answers) => answers,
        Err(e) => {
            error!(question = %owner, error = %e, "Failed to build local answer");
            return send_error_response(request, response_handle, ResponseCode::ServFail).await;
        }
    };
    if answers.is_empty() {
        debug!(question = %owner, "Empty local record set (NODATA)");
    }

    let header = ResponseBuilder::answer_header(request.header());
    let mut builder = MessageResponseBuilder::from_message_request(request);
    if let Some(edns) = response_edns(request) {
        builder.edns(edns);
    }
    let response = builder.build(header, answers.iter(), &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}

/// Relays flags, response code and every section of the upstream reply under the client's ID.
async fn relay_upstream_response<R: ResponseHandler>(
    request: &Request,
    reply: &[u8],
    response_handle: &mut R,
) -> ResponseInfo {
    let upstream = match Message::from_vec(reply) {
        Ok(message) => message,
        Err(e) => {
            error!(error = %e, "Upstream reply no longer parses");
            return send_error_response(request, response_handle, ResponseCode::ServFail).await;
        }
    };

    let mut header = *upstream.header();
    header.set_id(request.id());

    let mut builder = MessageResponseBuilder::from_message_request(request);
    if let Some(edns) = upstream.extensions() {
        builder.edns(edns.clone());
    }
    let response = builder.build(
        header,
        upstream.answers(),
        upstream.name_servers(),
        &[],
        upstream.additionals(),
    );

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send forwarded response");
            ResponseInfo::from(*request.header())
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let mut builder = MessageResponseBuilder::from_message_request(request);
    if let Some(edns) = response_edns(request) {
        builder.edns(edns);
    }
    let mut header = *request.header();
    header.set_message_type(hickory_proto::op::MessageType::Response);
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}

/// OPT record for responses built here, present only when the client sent one.
fn response_edns(request: &Request) -> Option<Edns> {
    let client = request.edns()?;
    let mut edns = Edns::new();
    edns.set_max_payload(client.max_payload().max(512));
    edns.set_version(client.version());
    Some(edns)
}

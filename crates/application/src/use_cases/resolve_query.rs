use crate::services::{ForwardedResponse, RecurseForwarder};
use crate::use_cases::SharedAnswerStore;
use answer_dns_domain::{DnsRequest, DomainError, LocalAnswer};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub enum Resolution {
    /// Answered from the answers file.
    Local(LocalAnswer),
    /// Relayed from a recursion target.
    Forwarded(ForwardedResponse),
}

/// Local answers first, then the client's recursion targets.
pub struct ResolveQueryUseCase {
    answers: SharedAnswerStore,
    forwarder: Arc<RecurseForwarder>,
}

impl ResolveQueryUseCase {
    pub fn new(answers: SharedAnswerStore, forwarder: Arc<RecurseForwarder>) -> Self {
        Self { answers, forwarder }
    }

    /// `wire_query` is the client's message, forwarded unchanged when nothing matches locally.
    pub async fn execute(
        &self,
        request: &DnsRequest,
        wire_query: &[u8],
    ) -> Result<Resolution, DomainError> {
        let store = self.answers.load_full();
        debug!(
            client = %request.client_ip,
            question = %request.domain,
            record_type = ?request.record_type,
            protocol = %request.protocol,
            "Received query"
        );

        if let Some(record_type) = request.record_type {
            if let Some(answer) = store.resolve_local(request.client_ip, &request.domain, record_type) {
                info!(
                    client = %request.client_ip,
                    question = %request.domain,
                    record_type = %record_type,
                    source = answer.source.as_str(),
                    found = answer.records.len(),
                    "Answered locally"
                );
                return Ok(Resolution::Local(answer));
            }
        }

        let targets = store.recurse_targets(request.client_ip);
        match self
            .forwarder
            .forward(wire_query, &targets, request.protocol)
            .await
        {
            Ok(response) => {
                info!(
                    client = %request.client_ip,
                    question = %request.domain,
                    upstream = %response.upstream,
                    latency_ms = response.latency_ms,
                    "Forwarded"
                );
                Ok(Resolution::Forwarded(response))
            }
            Err(e) => {
                warn!(
                    client = %request.client_ip,
                    question = %request.domain,
                    record_type = ?request.record_type,
                    error = %e,
                    "No answer found"
                );
                Err(e)
            }
        }
    }
}

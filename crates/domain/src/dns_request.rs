use super::{RecordType, TransportProtocol};
use std::net::IpAddr;
use std::sync::Arc;

/// A question as seen by the resolution engine.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    /// Question name, lowercased, with trailing dot.
    pub domain: Arc<str>,
    /// `None` when the query type has no local representation.
    pub record_type: Option<RecordType>,
    pub client_ip: IpAddr,
    pub protocol: TransportProtocol,
}

impl DnsRequest {
    pub fn new(
        domain: impl Into<Arc<str>>,
        record_type: Option<RecordType>,
        client_ip: IpAddr,
        protocol: TransportProtocol,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            client_ip,
            protocol,
        }
    }
}

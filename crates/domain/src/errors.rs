use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid record data: {0}")]
    InvalidRecordData(String),

    #[error("Invalid upstream address: {0}")]
    InvalidUpstream(String),

    #[error("Malformed query: {0}")]
    QueryError(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportError { server: String, reason: String },

    #[error("No recursion targets configured for client")]
    NoRecurseTargets,

    #[error("All {attempted} recursion targets failed")]
    RecurseExhausted { attempted: usize },
}

impl DomainError {
    /// Failures of one upstream exchange. The forwarder moves on to the next target
    /// for these and aborts the walk for anything else.
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportTimeout { .. }
                | Self::TransportConnectionRefused { .. }
                | Self::TransportConnectionReset { .. }
                | Self::TransportError { .. }
                | Self::InvalidDnsResponse(_)
                | Self::IoError(_)
                | Self::InvalidUpstream(_)
        )
    }
}

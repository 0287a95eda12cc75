//! answer-dns domain layer: client-scoped answers, selectors and the process configuration.
pub mod answers;
pub mod client_selector;
pub mod config;
pub mod dns_protocol;
pub mod dns_record;
pub mod dns_request;
pub mod errors;

pub use answers::{AnswerSource, AnswerStore, LocalAnswer, RecordSet, Zone};
pub use client_selector::{canonical_ip, ClientSelector, DEFAULT_SELECTOR};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_protocol::{TransportProtocol, UpstreamAddr, DEFAULT_DNS_PORT};
pub use dns_record::{normalize_fqdn, RecordData, RecordType};
pub use dns_request::DnsRequest;
pub use errors::DomainError;

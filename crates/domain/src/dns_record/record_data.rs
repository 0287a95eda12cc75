use super::fqdn::normalize_fqdn;
use super::record_type::RecordType;
use crate::DomainError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// One parsed answer value from the answers file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    CNAME(Arc<str>),
    NS(Arc<str>),
    PTR(Arc<str>),
    MX {
        preference: u16,
        exchange: Arc<str>,
    },
    TXT(Arc<str>),
    SRV {
        priority: u16,
        weight: u16,
        port: u16,
        target: Arc<str>,
    },
}

impl RecordData {
    /// Parses an answer string the way it is written in a zone file's RDATA column.
    pub fn parse(record_type: RecordType, raw: &str) -> Result<Self, DomainError> {
        let value = raw.trim();
        match record_type {
            RecordType::A => value
                .parse::<Ipv4Addr>()
                .map(RecordData::A)
                .map_err(|_| DomainError::InvalidIpAddress(value.to_string())),
            RecordType::AAAA => value
                .parse::<Ipv6Addr>()
                .map(RecordData::AAAA)
                .map_err(|_| DomainError::InvalidIpAddress(value.to_string())),
            RecordType::CNAME => normalize_fqdn(value).map(RecordData::CNAME),
            RecordType::NS => normalize_fqdn(value).map(RecordData::NS),
            RecordType::PTR => normalize_fqdn(value).map(RecordData::PTR),
            RecordType::TXT => Ok(RecordData::TXT(Arc::from(raw))),
            RecordType::MX => {
                let fields = split_fields(value, 2, "<preference> <exchange>")?;
                Ok(RecordData::MX {
                    preference: parse_u16(fields[0], "preference")?,
                    exchange: normalize_fqdn(fields[1])?,
                })
            }
            RecordType::SRV => {
                let fields = split_fields(value, 4, "<priority> <weight> <port> <target>")?;
                Ok(RecordData::SRV {
                    priority: parse_u16(fields[0], "priority")?,
                    weight: parse_u16(fields[1], "weight")?,
                    port: parse_u16(fields[2], "port")?,
                    target: normalize_fqdn(fields[3])?,
                })
            }
        }
    }

}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{}", ip),
            RecordData::AAAA(ip) => write!(f, "{}", ip),
            RecordData::CNAME(name) | RecordData::NS(name) | RecordData::PTR(name) => {
                write!(f, "{}", name)
            }
            RecordData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::TXT(text) => write!(f, "{}", text),
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{} {} {} {}", priority, weight, port, target),
        }
    }
}

fn split_fields<'a>(
    value: &'a str,
    expected: usize,
    format: &str,
) -> Result<Vec<&'a str>, DomainError> {
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() != expected {
        return Err(DomainError::InvalidRecordData(format!(
            "'{}' does not match {}",
            value, format
        )));
    }
    Ok(fields)
}

fn parse_u16(field: &str, what: &str) -> Result<u16, DomainError> {
    field
        .parse::<u16>()
        .map_err(|_| DomainError::InvalidRecordData(format!("invalid {} '{}'", what, field)))
}

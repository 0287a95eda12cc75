use answer_dns_domain::{DomainError, RecordData};
use hickory_proto::op::{Header, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, PTR, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record};

/// Longest character-string a TXT record can carry in one chunk.
const MAX_TXT_CHUNK: usize = 255;

/// Turns a local record set into wire records.
pub struct ResponseBuilder;

impl ResponseBuilder {
    /// One record per entry, in order, all owned by `owner` with the same TTL.
    pub fn answer_records(
        owner: &Name,
        records: &[RecordData],
        ttl: u32,
    ) -> Result<Vec<Record>, DomainError> {
        records
            .iter()
            .map(|data| Ok(Record::from_rdata(owner.clone(), ttl, Self::rdata(data)?)))
            .collect()
    }

    /// Authoritative NOERROR header answering `request`.
    pub fn answer_header(request: &Header) -> Header {
        let mut header = Header::response_from_request(request);
        header.set_authoritative(true);
        header.set_recursion_available(true);
        header.set_response_code(ResponseCode::NoError);
        header
    }

    fn rdata(data: &RecordData) -> Result<RData, DomainError> {
        let rdata = match data {
            RecordData::A(ip) => RData::A(A(*ip)),
            RecordData::AAAA(ip) => RData::AAAA(AAAA(*ip)),
            RecordData::CNAME(name) => RData::CNAME(CNAME(parse_name(name)?)),
            RecordData::NS(name) => RData::NS(NS(parse_name(name)?)),
            RecordData::PTR(name) => RData::PTR(PTR(parse_name(name)?)),
            RecordData::MX {
                preference,
                exchange,
            } => RData::MX(MX::new(*preference, parse_name(exchange)?)),
            RecordData::TXT(text) => RData::TXT(TXT::new(txt_chunks(text))),
            RecordData::SRV {
                priority,
                weight,
                port,
                target,
            } => RData::SRV(SRV::new(*priority, *weight, *port, parse_name(target)?)),
        };
        Ok(rdata)
    }
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_ascii(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("{}: {}", name, e)))
}

/// Splits long text into character-strings without cutting a UTF-8 sequence.
fn txt_chunks(text: &str) -> Vec<String> {
    if text.len() <= MAX_TXT_CHUNK {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let mut end = rest.len().min(MAX_TXT_CHUNK);
        while !rest.is_char_boundary(end) {
            end -= 1;
        }
        let (chunk, tail) = rest.split_at(end);
        chunks.push(chunk.to_string());
        rest = tail;
    }
    chunks
}

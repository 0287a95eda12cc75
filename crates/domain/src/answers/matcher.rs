use super::store::AnswerStore;
use super::zone::RecordSet;
use crate::{canonical_ip, RecordType, UpstreamAddr};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Which zone produced a local answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// Carries the selector as written in the answers file.
    ClientSpecific { selector: Arc<str> },
    Default,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::ClientSpecific { .. } => "client",
            AnswerSource::Default => "default",
        }
    }
}

impl fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerSource::ClientSpecific { selector } => write!(f, "client ({})", selector),
            AnswerSource::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocalAnswer {
    pub records: RecordSet,
    pub source: AnswerSource,
}

impl AnswerStore {
    /// Finds the record set for `fqdn`/`record_type` as seen by `client_ip`.
    ///
    /// Client zones are searched most specific first, then the default zone.
    /// `fqdn` may use any case and may omit the trailing dot.
    pub fn resolve_local(
        &self,
        client_ip: IpAddr,
        fqdn: &str,
        record_type: RecordType,
    ) -> Option<LocalAnswer> {
        let name = lookup_key(fqdn);
        let client_ip = canonical_ip(client_ip);

        let client_match = self
            .scoped
            .iter()
            .filter(|scoped| scoped.selector.contains(client_ip))
            .find_map(|scoped| {
                scoped
                    .zone
                    .lookup(&name, record_type)
                    .map(|records| LocalAnswer {
                        records: Arc::clone(records),
                        source: AnswerSource::ClientSpecific {
                            selector: Arc::clone(&scoped.key),
                        },
                    })
            });
        if client_match.is_some() {
            return client_match;
        }

        self.default_zone
            .lookup(&name, record_type)
            .map(|records| LocalAnswer {
                records: Arc::clone(records),
                source: AnswerSource::Default,
            })
    }

    /// Upstreams to try for `client_ip`: matching client zones in match order, then
    /// the default zone. Each target appears once.
    pub fn recurse_targets(&self, client_ip: IpAddr) -> Vec<UpstreamAddr> {
        let client_ip = canonical_ip(client_ip);
        let mut seen = HashSet::new();

        self.scoped
            .iter()
            .filter(|scoped| scoped.selector.contains(client_ip))
            .flat_map(|scoped| scoped.zone.recurse_targets())
            .chain(self.default_zone.recurse_targets())
            .filter(|target| seen.insert(*target))
            .cloned()
            .collect()
    }
}

fn lookup_key(fqdn: &str) -> Cow<'_, str> {
    let needs_lowercase = fqdn.bytes().any(|b| b.is_ascii_uppercase());
    let needs_dot = !fqdn.ends_with('.');
    match (needs_lowercase, needs_dot) {
        (false, false) => Cow::Borrowed(fqdn),
        _ => {
            let mut key = fqdn.to_ascii_lowercase();
            if needs_dot {
                key.push('.');
            }
            Cow::Owned(key)
        }
    }
}

use crate::{RecordData, RecordType, UpstreamAddr};
use std::collections::HashMap;
use std::sync::Arc;

/// Ordered answers for one (name, type); returned verbatim.
pub type RecordSet = Arc<[RecordData]>;

/// Answers owned by one client selector.
#[derive(Debug, Default, Clone)]
pub struct Zone {
    records: HashMap<Arc<str>, HashMap<RecordType, RecordSet>>,
    recurse: Vec<UpstreamAddr>,
}

impl Zone {
    /// `fqdn` must already be lowercase with a trailing dot.
    pub fn lookup(&self, fqdn: &str, record_type: RecordType) -> Option<&RecordSet> {
        self.records.get(fqdn)?.get(&record_type)
    }

    pub fn recurse_targets(&self) -> &[UpstreamAddr] {
        &self.recurse
    }

    pub fn record_set_count(&self) -> usize {
        self.records.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.recurse.is_empty()
    }

    pub(crate) fn insert(&mut self, fqdn: Arc<str>, record_type: RecordType, records: RecordSet) {
        self.records
            .entry(fqdn)
            .or_default()
            .insert(record_type, records);
    }

    pub(crate) fn add_recurse_targets(&mut self, targets: impl IntoIterator<Item = UpstreamAddr>) {
        self.recurse.extend(targets);
    }

    pub(crate) fn take_recurse_targets(&mut self) -> Vec<UpstreamAddr> {
        std::mem::take(&mut self.recurse)
    }
}

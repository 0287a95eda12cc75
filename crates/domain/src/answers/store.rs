use super::raw::{RawAnswers, RECURSE_KEY};
use super::zone::{RecordSet, Zone};
use crate::config::ConfigError;
use crate::{normalize_fqdn, ClientSelector, RecordData, RecordType, UpstreamAddr};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// A zone owned by a network selector, in match order.
#[derive(Debug, Clone)]
pub(crate) struct ScopedZone {
    pub(crate) selector: ClientSelector,
    /// Selector exactly as written in the answers file, for logging.
    pub(crate) key: Arc<str>,
    pub(crate) zone: Zone,
}

/// Immutable snapshot of the answers file.
///
/// Network zones are kept sorted by prefix length, longest first; the sort is
/// stable so selectors of equal length keep their declaration order.
#[derive(Debug, Default, Clone)]
pub struct AnswerStore {
    pub(crate) scoped: Vec<ScopedZone>,
    pub(crate) default_zone: Zone,
}

impl AnswerStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses and validates an answers document. Nothing is partially applied on error.
    pub fn build(contents: &str) -> Result<Self, ConfigError> {
        let raw = RawAnswers::from_json(contents)?;

        let mut seen: HashSet<String> = HashSet::with_capacity(raw.entries.len());
        let mut scoped = Vec::new();
        let mut default_zone: Option<Zone> = None;
        let mut top_level_recurse = Vec::new();

        for (key, value) in &raw.entries {
            if key == RECURSE_KEY {
                top_level_recurse = parse_recurse_list(RECURSE_KEY, value)?;
                continue;
            }

            let selector: ClientSelector =
                key.parse()
                    .map_err(|reason: String| ConfigError::InvalidSelector {
                        selector: key.clone(),
                        reason,
                    })?;

            if !seen.insert(key.trim().to_ascii_lowercase()) {
                return Err(ConfigError::InvalidSelector {
                    selector: key.clone(),
                    reason: "declared more than once".to_string(),
                });
            }

            let zone = parse_zone(key, value)?;
            match selector {
                ClientSelector::Default => default_zone = Some(zone),
                ClientSelector::Network(_) => scoped.push(ScopedZone {
                    selector,
                    key: Arc::from(key.as_str()),
                    zone,
                }),
            }
        }

        scoped.sort_by(|a, b| b.selector.specificity().cmp(&a.selector.specificity()));

        let mut default_zone = default_zone.unwrap_or_default();
        if !top_level_recurse.is_empty() {
            let declared = default_zone.take_recurse_targets();
            default_zone.add_recurse_targets(top_level_recurse);
            default_zone.add_recurse_targets(declared);
        }

        Ok(Self {
            scoped,
            default_zone,
        })
    }

    /// Number of selectors with a zone, counting `default` only when it holds something.
    pub fn selector_count(&self) -> usize {
        self.scoped.len() + usize::from(!self.default_zone.is_empty())
    }

    pub fn record_set_count(&self) -> usize {
        self.scoped
            .iter()
            .map(|s| s.zone.record_set_count())
            .sum::<usize>()
            + self.default_zone.record_set_count()
    }

    pub fn recurse_target_count(&self) -> usize {
        self.scoped
            .iter()
            .map(|s| s.zone.recurse_targets().len())
            .sum::<usize>()
            + self.default_zone.recurse_targets().len()
    }

    pub fn default_zone(&self) -> &Zone {
        &self.default_zone
    }
}

fn parse_zone(selector: &str, value: &Value) -> Result<Zone, ConfigError> {
    let entries = value.as_object().ok_or_else(|| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        reason: "zone must be an object keyed by domain name".to_string(),
    })?;

    // Names and types that only differ in case would otherwise overwrite each other.
    let mut declared: HashSet<(Arc<str>, RecordType)> = HashSet::new();
    let mut zone = Zone::default();
    for (name, types) in entries {
        if name == RECURSE_KEY {
            zone.add_recurse_targets(parse_recurse_list(selector, types)?);
            continue;
        }

        let fqdn = normalize_fqdn(name).map_err(|e| ConfigError::InvalidAnswer {
            selector: selector.to_string(),
            name: name.clone(),
            record_type: "-".to_string(),
            reason: e.to_string(),
        })?;
        let types = types.as_object().ok_or_else(|| ConfigError::InvalidAnswer {
            selector: selector.to_string(),
            name: name.clone(),
            record_type: "-".to_string(),
            reason: "expected an object keyed by record type".to_string(),
        })?;

        for (type_key, values) in types {
            let record_type: RecordType =
                type_key
                    .parse()
                    .map_err(|reason: String| ConfigError::InvalidAnswer {
                        selector: selector.to_string(),
                        name: name.clone(),
                        record_type: type_key.clone(),
                        reason,
                    })?;
            if !declared.insert((Arc::clone(&fqdn), record_type)) {
                return Err(ConfigError::InvalidAnswer {
                    selector: selector.to_string(),
                    name: name.clone(),
                    record_type: type_key.clone(),
                    reason: "declared more than once".to_string(),
                });
            }
            let records = parse_record_set(selector, name, record_type, values)?;
            zone.insert(Arc::clone(&fqdn), record_type, records);
        }
    }
    Ok(zone)
}

fn parse_record_set(
    selector: &str,
    name: &str,
    record_type: RecordType,
    values: &Value,
) -> Result<RecordSet, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidAnswer {
        selector: selector.to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        reason,
    };

    let values = values
        .as_array()
        .ok_or_else(|| invalid("expected an array of answer strings".to_string()))?;

    values
        .iter()
        .map(|value| {
            let raw = value
                .as_str()
                .ok_or_else(|| invalid(format!("expected a string, found {}", value)))?;
            RecordData::parse(record_type, raw).map_err(|e| invalid(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RecordSet::from)
}

fn parse_recurse_list(selector: &str, value: &Value) -> Result<Vec<UpstreamAddr>, ConfigError> {
    let invalid = |target: String, reason: String| ConfigError::InvalidRecurseTarget {
        selector: selector.to_string(),
        target,
        reason,
    };

    let targets = value
        .as_array()
        .ok_or_else(|| invalid(value.to_string(), "expected an array of host[:port]".to_string()))?;

    targets
        .iter()
        .map(|target| {
            let raw = target
                .as_str()
                .ok_or_else(|| invalid(target.to_string(), "expected a string".to_string()))?;
            raw.parse::<UpstreamAddr>()
                .map_err(|reason| invalid(raw.to_string(), reason))
        })
        .collect()
}

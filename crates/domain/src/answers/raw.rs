use crate::config::ConfigError;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;
use std::fmt;

/// Reserved key holding recursion targets, at the top level or inside a zone.
pub const RECURSE_KEY: &str = "recurse";

/// The answers file as parsed JSON, with top-level keys kept in declaration order.
#[derive(Debug, Default)]
pub struct RawAnswers {
    pub entries: Vec<(String, Value)>,
}

impl RawAnswers {
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

struct RawAnswersVisitor;

impl<'de> Visitor<'de> for RawAnswersVisitor {
    type Value = RawAnswers;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object keyed by client selector")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            entries.push((key, value));
        }
        Ok(RawAnswers { entries })
    }
}

impl<'de> Deserialize<'de> for RawAnswers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawAnswersVisitor)
    }
}

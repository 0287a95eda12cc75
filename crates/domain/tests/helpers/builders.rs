#![allow(dead_code)]
use serde_json::{json, Value};

/// Builds an answers document, keeping selectors in the order they are added.
pub struct AnswersBuilder {
    entries: Vec<(String, Value)>,
}

impl AnswersBuilder {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn record(mut self, selector: &str, name: &str, record_type: &str, values: &[&str]) -> Self {
        let zone = self.zone_mut(selector);
        let types = zone
            .as_object_mut()
            .unwrap()
            .entry(name.to_string())
            .or_insert_with(|| json!({}));
        types
            .as_object_mut()
            .unwrap()
            .insert(record_type.to_string(), json!(values));
        self
    }

    pub fn recurse(mut self, selector: &str, targets: &[&str]) -> Self {
        let zone = self.zone_mut(selector);
        zone.as_object_mut()
            .unwrap()
            .insert("recurse".to_string(), json!(targets));
        self
    }

    pub fn top_level_recurse(mut self, targets: &[&str]) -> Self {
        self.entries.push(("recurse".to_string(), json!(targets)));
        self
    }

    pub fn build(&self) -> String {
        let body: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{}: {}", Value::String(key.clone()), value))
            .collect();
        format!("{{{}}}", body.join(", "))
    }

    fn zone_mut(&mut self, selector: &str) -> &mut Value {
        let index = match self.entries.iter().position(|(key, _)| key == selector) {
            Some(index) => index,
            None => {
                self.entries.push((selector.to_string(), json!({})));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

impl Default for AnswersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

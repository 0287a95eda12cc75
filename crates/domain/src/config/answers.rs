use serde::{Deserialize, Serialize};

/// Largest TTL a resource record may carry (RFC 2181 §8).
pub const MAX_TTL: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnswersConfig {
    /// JSON file holding the client-scoped answers.
    #[serde(default = "default_answers_path")]
    pub path: String,

    /// TTL applied to every locally answered record.
    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl Default for AnswersConfig {
    fn default() -> Self {
        Self {
            path: default_answers_path(),
            ttl: default_ttl(),
        }
    }
}

fn default_answers_path() -> String {
    "./answers.json".to_string()
}

fn default_ttl() -> u32 {
    600
}

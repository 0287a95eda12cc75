#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Invalid client selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid answer for {name} {record_type} in '{selector}': {reason}")]
    InvalidAnswer {
        selector: String,
        name: String,
        record_type: String,
        reason: String,
    },

    #[error("Invalid recurse target '{target}' in '{selector}': {reason}")]
    InvalidRecurseTarget {
        selector: String,
        target: String,
        reason: String,
    },
}

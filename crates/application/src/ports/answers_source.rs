use async_trait::async_trait;
use answer_dns_domain::ConfigError;

/// Where the answers document is read from on startup and on every reload.
#[async_trait]
pub trait AnswersSource: Send + Sync {
    async fn load(&self) -> Result<String, ConfigError>;

    /// Human readable location, used in log lines.
    fn describe(&self) -> String;
}

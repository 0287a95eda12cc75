use serde::{Deserialize, Serialize};

use super::answers::{AnswersConfig, MAX_TTL};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "answer-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/answer-dns/config.toml";

/// Process configuration for answer-dns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port)
    #[serde(default)]
    pub server: ServerConfig,

    /// Answers file location and answer TTL
    #[serde(default)]
    pub answers: AnswersConfig,

    /// Recursion (forwarding) settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Write the process id here at startup
    #[serde(default)]
    pub pid_file: Option<String>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. answer-dns.toml in current directory
    /// 3. /etc/answer-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(path) = Self::get_config_path() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(path) = overrides.answers_path {
            self.answers.path = path;
        }
        if let Some(ttl) = overrides.ttl {
            self.answers.ttl = ttl;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.debug {
            self.logging.level = "debug".to_string();
        }
        if let Some(pid_file) = overrides.pid_file {
            self.pid_file = Some(pid_file);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.server.listen_addr()?;

        if self.answers.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Answers file path cannot be empty".to_string(),
            ));
        }

        if self.answers.ttl > MAX_TTL {
            return Err(ConfigError::Validation(format!(
                "TTL {} exceeds maximum of {}",
                self.answers.ttl, MAX_TTL
            )));
        }

        if self.server.tcp_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "TCP timeout cannot be 0".to_string(),
            ));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub answers_path: Option<String>,
    pub ttl: Option<u32>,
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub pid_file: Option<String>,
    pub debug: bool,
}

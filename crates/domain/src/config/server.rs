use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Idle timeout for inbound TCP connections.
    #[serde(default = "default_tcp_timeout_secs")]
    pub tcp_timeout_secs: u64,
}

impl ServerConfig {
    pub fn tcp_timeout(&self) -> Duration {
        Duration::from_secs(self.tcp_timeout_secs)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.bind_address.parse().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}': {}",
                self.bind_address, e
            ))
        })?;
        Ok(SocketAddr::new(ip, self.dns_port))
    }

    /// Splits a `host:port` listen address. An empty host (`:53`) keeps the configured bind address.
    pub fn parse_listen(listen: &str) -> Result<(Option<String>, u16), ConfigError> {
        let (host, port) = listen
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::Validation(format!("Listen address '{}' has no port", listen)))?;

        let port = port.parse::<u16>().map_err(|e| {
            ConfigError::Validation(format!("Invalid port in listen address '{}': {}", listen, e))
        })?;

        let host = host.trim_start_matches('[').trim_end_matches(']');
        if host.is_empty() {
            Ok((None, port))
        } else {
            Ok((Some(host.to_string()), port))
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            tcp_timeout_secs: default_tcp_timeout_secs(),
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_tcp_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listen_port_only() {
        assert_eq!(ServerConfig::parse_listen(":53").unwrap(), (None, 53));
    }

    #[test]
    fn test_parse_listen_ipv4() {
        assert_eq!(
            ServerConfig::parse_listen("127.0.0.1:5353").unwrap(),
            (Some("127.0.0.1".to_string()), 5353)
        );
    }

    #[test]
    fn test_parse_listen_ipv6() {
        assert_eq!(
            ServerConfig::parse_listen("[::1]:53").unwrap(),
            (Some("::1".to_string()), 53)
        );
    }

    #[test]
    fn test_parse_listen_rejects_missing_port() {
        assert!(ServerConfig::parse_listen("localhost").is_err());
        assert!(ServerConfig::parse_listen("127.0.0.1:dns").is_err());
    }

    #[test]
    fn test_listen_addr() {
        let config = ServerConfig {
            dns_port: 5300,
            bind_address: "::".to_string(),
            tcp_timeout_secs: 10,
        };
        assert_eq!(config.listen_addr().unwrap(), "[::]:5300".parse().unwrap());
    }
}

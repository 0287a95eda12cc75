use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

/// Port used for recursion targets written without one.
pub const DEFAULT_DNS_PORT: u16 = 53;

/// Transport a query arrived on; forwarding reuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    Udp,
    Tcp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportProtocol::Udp => "UDP",
            TransportProtocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An upstream server address that may or may not be resolved to an IP.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamAddr {
    Resolved(SocketAddr),
    Unresolved { hostname: Arc<str>, port: u16 },
}

impl fmt::Display for UpstreamAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpstreamAddr::Resolved(addr) => write!(f, "{}", addr),
            UpstreamAddr::Unresolved { hostname, port } => write!(f, "{}:{}", hostname, port),
        }
    }
}

fn parse_port(s: &str, port_str: &str) -> Result<u16, String> {
    port_str
        .parse::<u16>()
        .map_err(|e| format!("Invalid port in '{}': {}", s, e))
}

fn validate_hostname(s: &str, host: &str) -> Result<(), String> {
    if host.is_empty() {
        return Err(format!("Missing host in '{}'", s));
    }
    if host
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '[' || c == ']' || c == ':')
    {
        return Err(format!("Invalid host '{}' in '{}'", host, s));
    }
    Ok(())
}

/// Parses `host[:port]`; the port defaults to 53.
impl FromStr for UpstreamAddr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(UpstreamAddr::Resolved(addr));
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }
        if let Some(inner) = s.strip_prefix('[').and_then(|r| r.strip_suffix(']')) {
            let ip = inner
                .parse::<IpAddr>()
                .map_err(|e| format!("Invalid IPv6 address in '{}': {}", s, e))?;
            return Ok(UpstreamAddr::Resolved(SocketAddr::new(ip, DEFAULT_DNS_PORT)));
        }

        let (host, port) = match s.rsplit_once(':') {
            Some((host, port_str)) => (host, parse_port(s, port_str)?),
            None => (s, DEFAULT_DNS_PORT),
        };
        validate_hostname(s, host)?;

        Ok(UpstreamAddr::Unresolved {
            hostname: host.into(),
            port,
        })
    }
}

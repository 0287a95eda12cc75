use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Reserved selector key that applies to every client.
pub const DEFAULT_SELECTOR: &str = "default";

/// Top-level key of the answers file: which clients a zone applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientSelector {
    Default,
    Network(IpNetwork),
}

impl ClientSelector {
    pub fn contains(&self, ip: IpAddr) -> bool {
        match self {
            ClientSelector::Default => true,
            ClientSelector::Network(network) => network.contains(canonical_ip(ip)),
        }
    }

    /// Prefix length used for most-specific-first ordering; `default` sorts last.
    pub fn specificity(&self) -> Option<u8> {
        match self {
            ClientSelector::Default => None,
            ClientSelector::Network(network) => Some(network.prefix()),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ClientSelector::Default)
    }
}

/// Unwraps IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) so dual-stack listeners match IPv4 selectors.
pub fn canonical_ip(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map(IpAddr::V4).unwrap_or(ip),
        IpAddr::V4(_) => ip,
    }
}

impl FromStr for ClientSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(DEFAULT_SELECTOR) {
            return Ok(ClientSelector::Default);
        }
        if let Ok(ip) = s.parse::<IpAddr>() {
            let prefix = if ip.is_ipv4() { 32 } else { 128 };
            let network = IpNetwork::new(ip, prefix).map_err(|e| e.to_string())?;
            return Ok(ClientSelector::Network(network));
        }
        if !s.contains('/') {
            return Err("expected an IP address, a CIDR network or 'default'".to_string());
        }
        s.parse::<IpNetwork>()
            .map(ClientSelector::Network)
            .map_err(|e| e.to_string())
    }
}

impl fmt::Display for ClientSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientSelector::Default => f.write_str(DEFAULT_SELECTOR),
            ClientSelector::Network(network) => write!(f, "{}", network),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cidr_and_literal_ip() {
        let cidr: ClientSelector = "10.0.0.0/8".parse().unwrap();
        assert_eq!(cidr.specificity(), Some(8));

        let host: ClientSelector = "192.168.1.10".parse().unwrap();
        assert_eq!(host.specificity(), Some(32));
        assert!(host.contains("192.168.1.10".parse().unwrap()));
        assert!(!host.contains("192.168.1.11".parse().unwrap()));

        let v6: ClientSelector = "fd00::1".parse().unwrap();
        assert_eq!(v6.specificity(), Some(128));
    }

    #[test]
    fn test_parse_default() {
        assert_eq!("default".parse::<ClientSelector>(), Ok(ClientSelector::Default));
        assert!(ClientSelector::Default.contains("8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn test_rejects_invalid() {
        assert!("recurse".parse::<ClientSelector>().is_err());
        assert!("10.0.0.0/33".parse::<ClientSelector>().is_err());
        assert!("".parse::<ClientSelector>().is_err());
    }

    #[test]
    fn test_ipv4_mapped_client_matches_ipv4_network() {
        let selector: ClientSelector = "10.0.0.0/8".parse().unwrap();
        assert!(selector.contains("::ffff:10.1.2.3".parse().unwrap()));
    }
}

use crate::ports::{HostResolver, UpstreamTransport};
use answer_dns_domain::{DomainError, TransportProtocol, UpstreamAddr};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DNS_HEADER_LEN: usize = 12;

/// Upstream reply relayed back to the client as-is.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub message: Vec<u8>,
    pub upstream: SocketAddr,
    pub latency_ms: u64,
}

/// Walks recursion targets in order and returns the first upstream reply.
///
/// Any reply counts, including NXDOMAIN or SERVFAIL. Transport failures, unparseable
/// replies and ID mismatches move on to the next target; other errors end the walk.
pub struct RecurseForwarder {
    transport: Arc<dyn UpstreamTransport>,
    resolver: Arc<dyn HostResolver>,
    timeout: Duration,
}

impl RecurseForwarder {
    pub fn new(
        transport: Arc<dyn UpstreamTransport>,
        resolver: Arc<dyn HostResolver>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            resolver,
            timeout,
        }
    }

    pub async fn forward(
        &self,
        query: &[u8],
        targets: &[UpstreamAddr],
        protocol: TransportProtocol,
    ) -> Result<ForwardedResponse, DomainError> {
        if targets.is_empty() {
            return Err(DomainError::NoRecurseTargets);
        }
        let query_id = message_id(query)
            .ok_or_else(|| DomainError::QueryError("query shorter than a DNS header".to_string()))?;
        debug!(targets = targets.len(), protocol = %protocol, "Forwarding sequentially");

        let mut tried: HashSet<SocketAddr> = HashSet::with_capacity(targets.len());
        for (position, target) in targets.iter().enumerate() {
            let server = match self.resolve_target(target).await {
                Ok(server) => server,
                Err(e) => {
                    warn!(upstream = %target, error = %e, position, "Could not resolve recursion target");
                    continue;
                }
            };
            if !tried.insert(server) {
                debug!(upstream = %server, "Already tried, skipping");
                continue;
            }

            let start = Instant::now();
            match self.exchange(server, query, query_id, protocol).await {
                Ok(message) => {
                    let latency_ms = start.elapsed().as_millis() as u64;
                    debug!(upstream = %server, latency_ms, position, "Upstream responded");
                    return Ok(ForwardedResponse {
                        message,
                        upstream: server,
                        latency_ms,
                    });
                }
                Err(e) if e.is_transport_error() => {
                    warn!(upstream = %server, error = %e, position, "Recursion target failed");
                }
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::RecurseExhausted {
            attempted: targets.len(),
        })
    }

    async fn resolve_target(&self, target: &UpstreamAddr) -> Result<SocketAddr, DomainError> {
        match target {
            UpstreamAddr::Resolved(addr) => Ok(*addr),
            UpstreamAddr::Unresolved { hostname, port } => {
                let addrs = tokio::time::timeout(self.timeout, self.resolver.resolve(hostname, *port))
                    .await
                    .map_err(|_| DomainError::TransportTimeout {
                        server: target.to_string(),
                    })??;
                addrs.into_iter().next().ok_or_else(|| {
                    DomainError::InvalidUpstream(format!("{} resolved to no addresses", hostname))
                })
            }
        }
    }

    async fn exchange(
        &self,
        server: SocketAddr,
        query: &[u8],
        query_id: u16,
        protocol: TransportProtocol,
    ) -> Result<Vec<u8>, DomainError> {
        let reply = self
            .transport
            .exchange(server, query, protocol, self.timeout)
            .await?;

        match message_id(&reply) {
            Some(id) if id == query_id => Ok(reply),
            Some(id) => Err(DomainError::InvalidDnsResponse(format!(
                "reply id {} does not match query id {}",
                id, query_id
            ))),
            None => Err(DomainError::InvalidDnsResponse(
                "reply shorter than a DNS header".to_string(),
            )),
        }
    }
}

fn message_id(message: &[u8]) -> Option<u16> {
    if message.len() < DNS_HEADER_LEN {
        return None;
    }
    Some(u16::from_be_bytes([message[0], message[1]]))
}

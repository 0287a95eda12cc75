#![allow(dead_code)]

use answer_dns_application::ports::{AnswersSource, HostResolver, UpstreamTransport};
use async_trait::async_trait;
use answer_dns_domain::{ConfigError, DomainError, TransportProtocol};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Minimal DNS message: a 12 byte header with `id` and one question count.
pub fn wire_query(id: u16) -> Vec<u8> {
    let mut message = vec![0u8; 12];
    message[0..2].copy_from_slice(&id.to_be_bytes());
    message[2] = 0x01;
    message[5] = 0x01;
    message
}

/// Reply to `query` with the QR bit and the given response code.
pub fn wire_reply(query: &[u8], rcode: u8) -> Vec<u8> {
    let mut reply = query.to_vec();
    reply[2] |= 0x80;
    reply[3] = (reply[3] & 0xf0) | (rcode & 0x0f);
    reply
}

#[derive(Clone)]
pub enum MockReply {
    /// Echo the query back as a reply with this rcode.
    Answer(u8),
    /// Reply with a different message id.
    WrongId,
    Fail(DomainError),
}

#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<HashMap<SocketAddr, MockReply>>>,
    calls: Arc<Mutex<Vec<(SocketAddr, TransportProtocol)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&self, server: &str, reply: MockReply) {
        self.replies
            .lock()
            .unwrap()
            .insert(server.parse().unwrap(), reply);
    }

    pub fn calls(&self) -> Vec<(SocketAddr, TransportProtocol)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn servers_called(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|(server, _)| server.to_string())
            .collect()
    }
}

#[async_trait]
impl UpstreamTransport for MockTransport {
    async fn exchange(
        &self,
        server: SocketAddr,
        message: &[u8],
        protocol: TransportProtocol,
        _timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        self.calls.lock().unwrap().push((server, protocol));
        let reply = self.replies.lock().unwrap().get(&server).cloned();
        match reply {
            Some(MockReply::Answer(rcode)) => Ok(wire_reply(message, rcode)),
            Some(MockReply::WrongId) => {
                let mut reply = wire_reply(message, 0);
                reply[0] ^= 0xff;
                Ok(reply)
            }
            Some(MockReply::Fail(e)) => Err(e),
            None => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
        }
    }
}

#[derive(Clone, Default)]
pub struct MockHostResolver {
    hosts: Arc<Mutex<HashMap<String, Vec<SocketAddr>>>>,
}

impl MockHostResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_host(&self, hostname: &str, ips: &[&str]) {
        self.hosts.lock().unwrap().insert(
            hostname.to_string(),
            ips.iter()
                .map(|ip| SocketAddr::new(ip.parse().unwrap(), 0))
                .collect(),
        );
    }
}

#[async_trait]
impl HostResolver for MockHostResolver {
    async fn resolve(&self, hostname: &str, port: u16) -> Result<Vec<SocketAddr>, DomainError> {
        self.hosts
            .lock()
            .unwrap()
            .get(hostname)
            .map(|addrs| {
                addrs
                    .iter()
                    .map(|addr| SocketAddr::new(addr.ip(), port))
                    .collect()
            })
            .ok_or_else(|| DomainError::InvalidUpstream(format!("unknown host {}", hostname)))
    }
}

#[derive(Clone)]
pub struct MockAnswersSource {
    contents: Arc<Mutex<Result<String, ConfigError>>>,
    delay: Duration,
    loads: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockAnswersSource {
    pub fn new(contents: &str) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Ok(contents.to_string()))),
            delay: Duration::ZERO,
            loads: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every load sleeps this long before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Highest number of loads that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn set_contents(&self, contents: &str) {
        *self.contents.lock().unwrap() = Ok(contents.to_string());
    }

    pub fn set_unreadable(&self) {
        *self.contents.lock().unwrap() = Err(ConfigError::FileRead(
            "answers.json".to_string(),
            "No such file or directory".to_string(),
        ));
    }
}

#[async_trait]
impl AnswersSource for MockAnswersSource {
    async fn load(&self) -> Result<String, ConfigError> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let contents = self.contents.lock().unwrap().clone();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.loads.fetch_add(1, Ordering::SeqCst);
        contents
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

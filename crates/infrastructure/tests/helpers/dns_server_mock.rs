#![allow(dead_code)]

use hickory_proto::op::{Edns, Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

#[derive(Clone, Debug)]
pub enum MockMode {
    /// Answer with one A record per address and the given response code.
    Answer {
        rcode: ResponseCode,
        addresses: Vec<Ipv4Addr>,
    },
    /// NOERROR without records, carrying an OPT record with this payload size.
    Edns { max_payload: u16 },
    /// Reply with bytes that are not a DNS message.
    Garbage,
    /// Reply with a valid message carrying another ID.
    WrongId,
    /// Never reply.
    Silent,
}

/// Upstream resolver on loopback, serving both UDP and TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Message>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let udp = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = udp.local_addr()?;
        let tcp = TcpListener::bind(addr).await?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = Arc::clone(&received);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = udp.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(reply) = respond(&buf[..len], &mode, &log) {
                                let _ = udp.send_to(&reply, peer).await;
                            }
                        }
                    }
                    result = tcp.accept() => {
                        if let Ok((mut stream, _)) = result {
                            let mode = mode.clone();
                            let log = Arc::clone(&log);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(reply) = respond(&query, &mode, &log) {
                                    let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
                                    let _ = stream.write_all(&reply).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn received(&self) -> Vec<Message> {
        self.received.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn respond(query: &[u8], mode: &MockMode, log: &Mutex<Vec<Message>>) -> Option<Vec<u8>> {
    let query = Message::from_vec(query).ok()?;
    log.lock().unwrap().push(query.clone());

    let mut reply = Message::new();
    reply.set_id(query.id());
    reply.set_message_type(MessageType::Response);
    reply.set_op_code(query.op_code());
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(query.queries().to_vec());

    match mode {
        MockMode::Answer { rcode, addresses } => {
            reply.set_response_code(*rcode);
            if let Some(question) = query.queries().first() {
                for address in addresses {
                    reply.add_answer(Record::from_rdata(
                        question.name().clone(),
                        60,
                        RData::A(A(*address)),
                    ));
                }
            }
            reply.to_vec().ok()
        }
        MockMode::Edns { max_payload } => {
            let mut edns = Edns::new();
            edns.set_max_payload(*max_payload);
            reply.set_edns(edns);
            reply.to_vec().ok()
        }
        MockMode::Garbage => Some(vec![0xde, 0xad, 0xbe, 0xef]),
        MockMode::WrongId => {
            reply.set_id(query.id().wrapping_add(1));
            reply.to_vec().ok()
        }
        MockMode::Silent => None,
    }
}

#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone)]
pub enum PtrServerMode {
    Answer(Vec<&'static str>),
    /// Sends a reply with the wrong message ID before the real answer.
    StrayThenAnswer(Vec<&'static str>),
    NxDomain,
    ServFail,
    Silent,
}

pub struct MockPtrServer {
    addr: SocketAddr,
    queries: Arc<AtomicU64>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockPtrServer {
    pub async fn start(mode: PtrServerMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], &mode) {
                                if matches!(mode, PtrServerMode::StrayThenAnswer(_)) {
                                    let mut stray = response.clone();
                                    stray[0] ^= 0xff;
                                    let _ = socket.send_to(&stray, peer).await;
                                }
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }

    fn build_response(query: &[u8], mode: &PtrServerMode) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (rcode, names): (u8, &[&str]) = match mode {
            PtrServerMode::Answer(names) | PtrServerMode::StrayThenAnswer(names) => {
                (0x00, names.as_slice())
            }
            PtrServerMode::NxDomain => (0x03, &[]),
            PtrServerMode::ServFail => (0x02, &[]),
            PtrServerMode::Silent => return None,
        };

        let mut response = Vec::with_capacity(512);

        // ID
        response.extend_from_slice(&query[0..2]);
        // QR + RD, RA + RCODE
        response.push(0x81);
        response.push(0x80 | rcode);
        // QDCOUNT
        response.extend_from_slice(&query[4..6]);
        // ANCOUNT
        response.extend_from_slice(&(names.len() as u16).to_be_bytes());
        // NSCOUNT, ARCOUNT
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        // Question section as received
        response.extend_from_slice(&query[12..]);

        for name in names {
            let rdata = encode_name(name);
            response.extend_from_slice(&[
                0xc0, 0x0c, // pointer to question name
                0x00, 0x0c, // PTR
                0x00, 0x01, // IN
                0x00, 0x00, 0x0e, 0x10, // TTL 3600
            ]);
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(&rdata);
        }

        Some(response)
    }
}

impl Drop for MockPtrServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn encode_name(name: &str) -> Vec<u8> {
    let mut out = Vec::new();
    for label in name.split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    out
}

//! Minimal HTTP/1.1 server answering each connection with a scripted reply.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What the server does with one connection.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with a status line and a body.
    Status(u16, String),
    /// Read the request, then hold the connection open without answering.
    Stall(Duration),
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::Status(200, body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self::Status(status, body.to_string())
    }
}

/// A running stub. Replies are consumed in order; the last one repeats.
pub struct StubServer {
    pub url: String,
    hits: Arc<AtomicU32>,
}

impl StubServer {
    pub async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicU32::new(0));
        let script = Arc::new(Mutex::new(VecDeque::from(replies)));

        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let reply = {
                    let mut script = script.lock().unwrap();
                    if script.len() > 1 {
                        script.pop_front()
                    } else {
                        script.front().cloned()
                    }
                };

                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let _ = socket.read(&mut buf).await;
                    match reply {
                        Some(Reply::Status(status, body)) => {
                            let response = format!(
                                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                                reason(status),
                                body.len()
                            );
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                        Some(Reply::Stall(hold)) => tokio::time::sleep(hold).await,
                        None => {}
                    }
                });
            }
        });

        Self {
            url: format!("http://{addr}/iss-now.json"),
            hits,
        }
    }

    /// Connections accepted so far.
    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A local URL with nothing listening on it.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/iss-now.json")
}

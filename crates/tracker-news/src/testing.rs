//! Test doubles shared by unit tests

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tracker_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, Result,
};

use crate::prompts::SUMMARY_SYSTEM_PROMPT;

/// Language model answering from a script, counting calls
pub(crate) struct FakeProvider {
    summary: Option<String>,
    sentiment: Option<String>,
    pub calls: AtomicUsize,
    systems: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn replying(summary: &str, sentiment: &str) -> Self {
        Self {
            summary: Some(summary.to_string()),
            sentiment: Some(sentiment.to_string()),
            calls: AtomicUsize::new(0),
            systems: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            summary: None,
            sentiment: None,
            calls: AtomicUsize::new(0),
            systems: Mutex::new(Vec::new()),
        }
    }

    /// System prompts seen so far, in call order
    pub fn systems(&self) -> Vec<String> {
        self.systems.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for FakeProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let system = request.system.unwrap_or_default();
        self.systems.lock().unwrap().push(system.clone());

        let reply = if system == SUMMARY_SYSTEM_PROMPT {
            self.summary.clone()
        } else {
            self.sentiment.clone()
        };

        reply
            .map(|text| CompletionResponse {
                message: Message::assistant(text),
                usage: None,
            })
            .ok_or(LLMError::Timeout)
    }

    fn default_model(&self) -> &str {
        "fake-model"
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Read one HTTP request: headers plus `content-length` bytes of body
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Loopback server answering exactly one request with `status` and `body`
///
/// Returns the base URL to point a client at and a handle resolving to the
/// raw request that was received.
pub async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        request
    });

    (base, handle)
}

/// Loopback server that accepts a connection and never answers
pub async fn serve_silence() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
        drop(stream);
    });

    base
}

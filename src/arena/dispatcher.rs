// src/arena/dispatcher.rs
use super::types::{ArenaBlock, SendOutcome};
use crate::clipboard::ClipboardChange;
use crate::session::MonitorSession;

use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const ARENA_API_BASE: &str = "https://api.are.na/v2";

/// Descriptive client identifier sent with every request.
const CLIENT_USER_AGENT: &str = concat!("clip2arena/", env!("CARGO_PKG_VERSION"));

/// Fixed per-request timeout; expiry yields a failure outcome, never a retry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Capacity of the outcome channel feeding the status sink.
const OUTCOME_CHANNEL_CAPACITY: usize = 32;

/// How much of an error response body is kept for diagnostics.
const MAX_BODY_PREVIEW: usize = 500;

/// Posts content blocks to an Are.na channel. One instance is shared by all
/// dispatch tasks; `reqwest::Client` pools connections internally.
pub struct ArenaDispatcher {
    client: Client,
    base_url: String,
}

impl ArenaDispatcher {
    pub fn new() -> Self {
        Self::with_base_url(ARENA_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Send one content block. Never panics and never retries; every path
    /// resolves to a [`SendOutcome`] for the status sink.
    pub async fn send(&self, session: &MonitorSession, content: &str) -> SendOutcome {
        let block = ArenaBlock::new(content, session.block_title.as_deref());

        let body = match serde_json::to_vec(&block) {
            Ok(body) => body,
            Err(e) => {
                warn!("Payload encoding failed: {}", e);
                return SendOutcome::failure(None, format!("Error encoding JSON: {}", e));
            }
        };

        let url = format!("{}/channels/{}/blocks", self.base_url, session.channel_slug);
        info!("Sending block to Are.na channel `{}`", session.channel_slug);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::USER_AGENT, CLIENT_USER_AGENT)
            .bearer_auth(&session.access_token)
            .timeout(REQUEST_TIMEOUT)
            .body(body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                let message = if e.is_timeout() {
                    warn!("Are.na request timed out after {:?}", REQUEST_TIMEOUT);
                    format!("Request timed out ({:?})", REQUEST_TIMEOUT)
                } else if e.is_connect() {
                    warn!("Unable to connect to Are.na: {}", e);
                    format!("Unable to connect to Are.na: {}", e)
                } else {
                    warn!("Are.na request failed: {}", e);
                    format!("Request failed: {}", e)
                };
                return SendOutcome::failure(None, message);
            }
        };

        let status = response.status();
        if status.is_success() {
            info!("Sent to Are.na! (Status: {})", status.as_u16());
            SendOutcome::success(status.as_u16())
        } else {
            // Keep the response body for diagnostics where obtainable
            let body = response.text().await.unwrap_or_default();
            let preview = safe_truncate(&body, MAX_BODY_PREVIEW);
            warn!("Are.na rejected block ({}): {}", status.as_u16(), preview);
            SendOutcome::failure(Some(status.as_u16()), preview)
        }
    }
}

impl Default for ArenaDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Consume clipboard changes and dispatch each one on its own task, so a slow
/// network call never delays detection of the next change. Outcomes funnel
/// into the returned channel; the single consumer is the status sink.
///
/// The pump exits when the change channel closes (monitor stopped); in-flight
/// sends are not cancelled and report their outcomes independently, so two
/// rapid changes may complete out of order.
pub fn spawn_dispatch_pump(
    mut changes: mpsc::Receiver<ClipboardChange>,
    dispatcher: Arc<ArenaDispatcher>,
    session: MonitorSession,
) -> mpsc::Receiver<SendOutcome> {
    let (outcome_tx, outcome_rx) = mpsc::channel(OUTCOME_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        while let Some(change) = changes.recv().await {
            let dispatcher = Arc::clone(&dispatcher);
            let session = session.clone();
            let outcome_tx = outcome_tx.clone();

            tokio::spawn(async move {
                let outcome = dispatcher.send(&session, &change.content).await;
                // Status sink may already be gone during shutdown
                let _ = outcome_tx.send(outcome).await;
            });
        }
        info!("Dispatch pump stopped (change channel closed)");
    });

    outcome_rx
}

// Truncate on a char boundary at or below `max_len` bytes.
fn safe_truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::time::{timeout, Duration};

    fn test_session() -> MonitorSession {
        MonitorSession::new("test-token", "test-channel", "").unwrap()
    }

    /// Serve one canned HTTP response on a local port, returning the base URL.
    async fn serve_one_response(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn success_response_yields_success_with_status() {
        let base = serve_one_response(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
        )
        .await;

        let dispatcher = ArenaDispatcher::with_base_url(base);
        let outcome = dispatcher.send(&test_session(), "hello").await;

        assert!(outcome.success);
        assert_eq!(outcome.status, Some(200));
    }

    #[tokio::test]
    async fn unprocessable_response_yields_failure_with_status_and_body() {
        let base = serve_one_response(
            "HTTP/1.1 422 Unprocessable Entity\r\ncontent-type: application/json\r\ncontent-length: 27\r\nconnection: close\r\n\r\n{\"message\":\"invalid block\"}",
        )
        .await;

        let dispatcher = ArenaDispatcher::with_base_url(base);
        let outcome = dispatcher.send(&test_session(), "hello").await;

        assert!(!outcome.success);
        assert_eq!(outcome.status, Some(422));
        assert!(outcome.message.contains("invalid block"));
    }

    #[tokio::test]
    async fn network_failure_yields_outcome_without_status() {
        // Nothing listens on port 1; the connection is refused immediately
        let dispatcher = ArenaDispatcher::with_base_url("http://127.0.0.1:1");
        let outcome = dispatcher.send(&test_session(), "hello").await;

        assert!(!outcome.success);
        assert!(outcome.status.is_none());
        assert!(!outcome.message.is_empty());
    }

    #[tokio::test]
    async fn pump_reports_outcomes_for_each_change() {
        let (change_tx, change_rx) = mpsc::channel(8);
        let dispatcher = Arc::new(ArenaDispatcher::with_base_url("http://127.0.0.1:1"));
        let mut outcomes = spawn_dispatch_pump(change_rx, dispatcher, test_session());

        change_tx
            .send(ClipboardChange::new("a".to_string()))
            .await
            .unwrap();
        change_tx
            .send(ClipboardChange::new("b".to_string()))
            .await
            .unwrap();
        drop(change_tx);

        // Both sends run independently; two outcomes arrive in some order
        for _ in 0..2 {
            let outcome = timeout(Duration::from_secs(5), outcomes.recv())
                .await
                .expect("timed out waiting for outcome")
                .expect("outcome channel closed early");
            assert!(!outcome.success);
        }
    }

    #[test]
    fn safe_truncate_respects_char_boundaries() {
        assert_eq!(safe_truncate("short", 10), "short");
        let truncated = safe_truncate("héllo wörld", 6);
        assert!(truncated.ends_with("..."));
    }
}

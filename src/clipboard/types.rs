// src/clipboard/types.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Poll period for clipboard sampling (milliseconds)
    pub poll_interval_ms: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
        }
    }
}

/// One detected clipboard change, carried from the poller to the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardChange {
    pub content: String,
    pub detected_at: chrono::DateTime<chrono::Utc>,
}

impl ClipboardChange {
    pub fn new(content: String) -> Self {
        Self {
            content,
            detected_at: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    AccessError(String),
    #[error("Monitor is already running")]
    AlreadyRunning,
}

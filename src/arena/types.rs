// src/arena/types.rs
use serde::Serialize;
use std::fmt;

/// The Are.na API payload (simplified): text content plus an optional title.
#[derive(Debug, Clone, Serialize)]
pub struct ArenaBlock {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ArenaBlock {
    /// Build a block from raw clipboard content. Line terminators are
    /// normalized to single spaces before transmission; an empty title is
    /// omitted from the payload entirely.
    pub fn new(content: &str, title: Option<&str>) -> Self {
        Self {
            content: normalize_line_breaks(content),
            title: title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }
}

/// Replace CR-LF (and stray CR/LF) line terminators with single spaces, the
/// same on every send path.
pub fn normalize_line_breaks(content: &str) -> String {
    content
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

/// Result of one send attempt, consumed by the status sink. The status code
/// is present iff an HTTP response was received.
#[derive(Debug, Clone, Serialize)]
pub struct SendOutcome {
    pub success: bool,
    pub status: Option<u16>,
    pub message: String,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl SendOutcome {
    pub fn success(status: u16) -> Self {
        Self {
            success: true,
            status: Some(status),
            message: format!("Sent to Are.na! (Status: {})", status),
            completed_at: chrono::Utc::now(),
        }
    }

    pub fn failure(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            message: message.into(),
            completed_at: chrono::Utc::now(),
        }
    }
}

impl fmt::Display for SendOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "{}", self.message)
        } else {
            match self.status {
                Some(code) => write!(f, "Send failed (Status: {}): {}", code, self.message),
                None => write!(f, "Send failed: {}", self.message),
            }
        }
    }
}

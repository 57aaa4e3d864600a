// src/clipboard/source.rs
use super::types::ClipboardError;

use arboard::Clipboard;
use log::debug;

/// The content source the poller samples. Production code uses
/// [`SystemClipboard`]; tests substitute scripted sources.
pub trait TextSource: Send {
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// System clipboard backed by `arboard`. A fresh handle is opened per read so
/// the type stays `Send` and no platform clipboard lock is held between ticks.
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| ClipboardError::AccessError(format!("Clipboard open failed: {}", e)))?;

        match clipboard.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => {
                // Clipboard empty or holding non-text content
                debug!("Clipboard read: content not available");
                Err(ClipboardError::AccessError(
                    "No text content available".to_string(),
                ))
            }
            Err(e) => Err(ClipboardError::AccessError(format!(
                "Clipboard read failed: {}",
                e
            ))),
        }
    }
}

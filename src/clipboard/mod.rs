// src/clipboard/mod.rs
pub mod monitor;
pub mod source;
pub mod types;

pub use monitor::ClipboardMonitor;
pub use source::{SystemClipboard, TextSource};
pub use types::{ClipboardChange, ClipboardError, MonitorConfig};

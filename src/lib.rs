// src/lib.rs
pub mod arena;
pub mod clipboard;
pub mod session;

pub use arena::{spawn_dispatch_pump, ArenaDispatcher, SendOutcome};
pub use clipboard::{ClipboardChange, ClipboardMonitor, MonitorConfig, SystemClipboard};
pub use session::{MonitorSession, SessionError};

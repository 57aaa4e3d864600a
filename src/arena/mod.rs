// src/arena/mod.rs
pub mod dispatcher;
pub mod types;

pub use dispatcher::{spawn_dispatch_pump, ArenaDispatcher, ARENA_API_BASE};
pub use types::{ArenaBlock, SendOutcome};

// src/main.rs
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use clip2arena::arena::{spawn_dispatch_pump, ArenaDispatcher};
use clip2arena::clipboard::{ClipboardMonitor, SystemClipboard};
use clip2arena::session::MonitorSession;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real environment variables win either way
    let _ = dotenv::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let session = MonitorSession::from_env().context("invalid configuration")?;

    info!("Starting clipboard monitor for Are.na...");
    info!("Sending to channel: {}", session.channel_slug);
    if let Some(title) = &session.block_title {
        info!("Blocks will be titled: {}", title);
    }
    info!("Copy text (Ctrl+C) anywhere and it will be posted. Press Ctrl+C here to stop.");

    let mut monitor = ClipboardMonitor::new(None);
    let changes = monitor
        .start_monitoring(SystemClipboard::new())
        .context("failed to start clipboard monitoring")?;

    let dispatcher = Arc::new(ArenaDispatcher::new());
    let mut outcomes = spawn_dispatch_pump(changes, dispatcher, session);

    // Status sink: the single consumer of send outcomes
    let sink = tokio::spawn(async move {
        while let Some(outcome) = outcomes.recv().await {
            if outcome.success {
                info!("{}", outcome);
            } else {
                warn!("{}", outcome);
            }
        }
    });

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    info!("Stopping the monitor...");
    monitor.stop_monitoring();

    // The sink drains once the poller and in-flight sends wind down
    let _ = sink.await;

    Ok(())
}

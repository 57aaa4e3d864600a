// src/clipboard/monitor.rs
use super::source::TextSource;
use super::types::{ClipboardChange, ClipboardError, MonitorConfig};

use log::{debug, info, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Capacity of the change (trigger) channel handed to the dispatcher.
const CHANGE_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug)]
enum MonitorCommand {
    Stop,
}

/// Polls a [`TextSource`] on a fixed interval and emits a [`ClipboardChange`]
/// whenever the content differs from the last emitted value.
///
/// Exactly one poller may be active per monitor; a second `start_monitoring`
/// while one is running is rejected with [`ClipboardError::AlreadyRunning`].
pub struct ClipboardMonitor {
    config: MonitorConfig,
    control_sender: Option<mpsc::Sender<MonitorCommand>>,
}

impl ClipboardMonitor {
    pub fn new(config: Option<MonitorConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
            control_sender: None,
        }
    }

    /// Start monitoring. Returns the receiving end of the change channel;
    /// the channel closes once the poller has terminated.
    ///
    /// The current clipboard content is recorded as last-seen at startup and
    /// never emitted, so pre-existing content does not trigger a send.
    pub fn start_monitoring<S: TextSource + 'static>(
        &mut self,
        source: S,
    ) -> Result<mpsc::Receiver<ClipboardChange>, ClipboardError> {
        if self.is_running() {
            return Err(ClipboardError::AlreadyRunning);
        }

        // Capacity 1: one stop signal outstanding at a time, extras dropped
        let (control_tx, control_rx) = mpsc::channel(1);
        let (change_tx, change_rx) = mpsc::channel(CHANGE_CHANNEL_CAPACITY);

        let config = self.config.clone();
        tokio::spawn(run_poller(source, config, change_tx, control_rx));

        self.control_sender = Some(control_tx);

        info!(
            "Clipboard monitoring started (poll interval {}ms)",
            self.config.poll_interval_ms
        );
        Ok(change_rx)
    }

    /// Request termination. Idempotent: stopping an already-stopped monitor
    /// is a no-op. The poller exits within one poll period and no change is
    /// emitted after that.
    pub fn stop_monitoring(&mut self) {
        let Some(control_sender) = self.control_sender.take() else {
            debug!("Stop requested but monitor is not running");
            return;
        };

        // Non-blocking delivery; a stop signal already pending is enough
        if let Err(e) = control_sender.try_send(MonitorCommand::Stop) {
            debug!("Stop signal not delivered (poller likely gone): {}", e);
        }

        info!("Clipboard monitoring stop requested");
    }

    /// Whether the poller task is alive. Reflects the task itself, not just
    /// past calls: a poller that exited because its change receiver was
    /// dropped reads as stopped, and a fresh start is then accepted.
    pub fn is_running(&self) -> bool {
        match &self.control_sender {
            Some(control_sender) => !control_sender.is_closed(),
            None => false,
        }
    }
}

/// The poller task. Owns the source and the last-seen value exclusively; no
/// locking is needed because nothing else writes either.
async fn run_poller<S: TextSource>(
    mut source: S,
    config: MonitorConfig,
    change_tx: mpsc::Sender<ClipboardChange>,
    mut control_rx: mpsc::Receiver<MonitorCommand>,
) {
    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; use it for the initial snapshot
    ticker.tick().await;

    let mut last_seen = match source.read_text() {
        Ok(text) => text,
        Err(e) => {
            warn!("Could not read the initial clipboard content: {}", e);
            String::new()
        }
    };

    info!("Clipboard poller started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let current = match source.read_text() {
                    Ok(text) => text,
                    Err(e) => {
                        // Transient read failure: treated as "no change"
                        debug!("Clipboard read failed, tick skipped: {}", e);
                        continue;
                    }
                };

                if current != last_seen && !current.is_empty() {
                    info!("New clipboard content detected: {} characters", current.len());

                    // Update last-seen before handing the change off so a
                    // slow consumer cannot cause a duplicate on the next tick
                    last_seen = current.clone();

                    if change_tx.send(ClipboardChange::new(current)).await.is_err() {
                        info!("Change receiver dropped, poller exiting");
                        break;
                    }
                }
            }
            cmd = control_rx.recv() => {
                match cmd {
                    Some(MonitorCommand::Stop) => info!("Received stop command, ending monitoring"),
                    None => debug!("Control channel closed, ending monitoring"),
                }
                break;
            }
        }
    }

    info!("Clipboard poller stopped");
}

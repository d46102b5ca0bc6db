//! Background alarm watcher.
//!
//! An independent observer of the shared alarm slot. It reconstructs the
//! pending completion after a restart, follows rewrites from other
//! processes, and when the deadline passes runs the same completion
//! protocol as the foreground commands with `source = "watcher"`. The
//! arbiter's lock makes the overlap safe.

use crate::db::slots::SlotStore;
use crate::libs::alarm::{self, Alarm};
use crate::libs::arbiter;
use crate::libs::clock;
use crate::libs::config::{FocusConfig, WatcherConfig};
use crate::libs::messages::Message;
use crate::libs::notify::Notifier;
use crate::libs::session::SessionSink;
use crate::{msg_debug, msg_print};
use anyhow::Result;
use tokio::time::{self, Duration};

pub struct AlarmWatcher<S, K> {
    config: WatcherConfig,
    focus: FocusConfig,
    store: S,
    sink: K,
    notifier: Notifier,
}

impl<S: SlotStore, K: SessionSink> AlarmWatcher<S, K> {
    pub fn new(config: WatcherConfig, focus: FocusConfig, store: S, sink: K, notifier: Notifier) -> Self {
        AlarmWatcher {
            config,
            focus,
            store,
            sink,
            notifier,
        }
    }

    /// Runs the watch loop until the process is stopped.
    ///
    /// Each iteration re-reads the alarm slot, so a rewrite from another
    /// process replaces whatever deadline was previously being waited on.
    /// Sleeps are capped at the poll interval; the deadline itself is always
    /// re-derived from the slot, never from a remembered duration.
    pub async fn run(&self) -> Result<()> {
        msg_print!(Message::WatcherStarted);
        loop {
            match alarm::read(&self.store) {
                Some(pending) => {
                    let delay_ms = (pending.end_at_ms - clock::now_ms()).max(0) as u64;
                    if delay_ms == 0 {
                        self.check_due(&pending).await?;
                        // Brief pause so a slot that failed to clear cannot
                        // spin the loop.
                        time::sleep(Duration::from_millis(self.config.poll_interval)).await;
                    } else {
                        time::sleep(Duration::from_millis(delay_ms.min(self.config.poll_interval))).await;
                    }
                }
                None => time::sleep(Duration::from_millis(self.config.poll_interval)).await,
            }
        }
    }

    /// Handles a deadline that has passed.
    ///
    /// Re-validates against the live slot first: the alarm may have been
    /// cancelled or replaced since it was scheduled, in which case this
    /// check is a no-op. Returns whether a completion was actually
    /// processed (won or lost, but matching the scheduled deadline).
    pub async fn check_due(&self, scheduled: &Alarm) -> Result<bool> {
        let latest = match alarm::read(&self.store) {
            Some(latest) if latest.end_at_ms == scheduled.end_at_ms => latest,
            _ => {
                msg_debug!("Alarm at {} changed or vanished before firing; skipping", scheduled.end_at_ms);
                return Ok(false);
            }
        };

        arbiter::handle_completion(
            &self.store,
            &self.sink,
            &self.notifier,
            &self.focus,
            &latest,
            "watcher",
            clock::now_ms(),
        )
        .await?;
        Ok(true)
    }
}

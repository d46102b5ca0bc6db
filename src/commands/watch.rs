//! Runs the background alarm watcher in the foreground of this process.

use crate::api::questly::QuestlySink;
use crate::db::slots::{SlotStore, Slots};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::notify::Notifier;
use crate::libs::session::{DisconnectedSink, SessionSink};
use crate::libs::watcher::AlarmWatcher;
use crate::msg_print;
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let store = Slots::new()?;
    let config = Config::read()?;
    let focus = config.focus();
    let notifier = Notifier::new(focus.sound);

    match &config.questly {
        Some(questly) => {
            run(AlarmWatcher::new(
                config.watcher(),
                focus,
                store,
                QuestlySink::new(questly),
                notifier,
            ))
            .await
        }
        None => {
            run(AlarmWatcher::new(config.watcher(), focus, store, DisconnectedSink, notifier)).await
        }
    }
}

/// Watches until the process is interrupted.
async fn run<S: SlotStore, K: SessionSink>(watcher: AlarmWatcher<S, K>) -> Result<()> {
    tokio::select! {
        result = watcher.run() => result,
        _ = tokio::signal::ctrl_c() => {
            msg_print!(Message::WatcherStopped);
            Ok(())
        }
    }
}

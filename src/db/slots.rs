//! Durable key-value slot storage shared by every questly process.
//!
//! The focus core coordinates exclusively through a handful of well-known
//! slots (`focus.state`, `focus.alarm`, `focus.receipt`, `focus.receipt.lock`,
//! `focus.selected_subject`). Each slot holds one JSON value and every write
//! replaces the whole value, so no reader ever observes a partially updated
//! slot. The slots live in the shared SQLite database, which makes per-key
//! writes atomic and visible to concurrently running questly processes.
//!
//! The store is consumed through the [`SlotStore`] trait so the timer core
//! never touches SQLite directly and tests can drive it against a throwaway
//! database.

use crate::db::db::Db;
use anyhow::Result;
use chrono::Local;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// SQL schema for the slots table.
///
/// One row per well-known key. `updated_at` exists for troubleshooting only;
/// the core never reads it.
const SCHEMA_SLOTS: &str = "CREATE TABLE IF NOT EXISTS slots (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP NOT NULL
)";

/// Replace the entire value of a slot, creating it if absent.
const UPSERT_SLOT: &str = "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

const SELECT_SLOT: &str = "SELECT value FROM slots WHERE key = ?1";

const DELETE_SLOT: &str = "DELETE FROM slots WHERE key = ?1";

/// In-process change listener, invoked with the key that was written or
/// removed.
pub type SlotListener = Box<dyn Fn(&str) + Send + Sync>;

/// The injected storage seam of the focus core.
///
/// `subscribe` notifies in-process observers of every write; observers in
/// other processes detect changes by re-reading slots before acting, which
/// the completion protocol requires anyway.
pub trait SlotStore: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn subscribe(&self, listener: SlotListener);
}

/// Reads a slot as JSON. A missing slot, an unreadable store or a malformed
/// value all read as `None` — the core treats broken persisted state the
/// same as absent state rather than failing a transition over it.
pub fn get_json<T: DeserializeOwned>(store: &dyn SlotStore, key: &str) -> Option<T> {
    let raw = store.get_raw(key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

/// Serializes `value` and replaces the slot with it.
pub fn set_json<T: Serialize>(store: &dyn SlotStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set_raw(key, &raw)
}

/// SQLite-backed implementation of [`SlotStore`].
///
/// The connection is shared behind a `parking_lot::Mutex` so the watcher
/// loop and command handlers can hold one instance between them.
pub struct Slots {
    conn: Arc<Mutex<Connection>>,
    listeners: Arc<Mutex<Vec<SlotListener>>>,
}

impl Slots {
    /// Opens the shared database and ensures the slots schema exists.
    pub fn new() -> Result<Slots> {
        let db_conn = Db::new()?.conn;
        db_conn.execute(SCHEMA_SLOTS, [])?;

        Ok(Slots {
            conn: Arc::new(Mutex::new(db_conn)),
            listeners: Arc::new(Mutex::new(Vec::new())),
        })
    }

    fn notify(&self, key: &str) {
        for listener in self.listeners.lock().iter() {
            listener(key);
        }
    }
}

impl SlotStore for Slots {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn_guard = self.conn.lock();
        let value = conn_guard
            .query_row(SELECT_SLOT, params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        {
            let conn_guard = self.conn.lock();
            let updated_at = Local::now().naive_local().format("%Y-%m-%d %H:%M:%S").to_string();
            conn_guard.execute(UPSERT_SLOT, params![key, value, updated_at])?;
        }
        self.notify(key);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        {
            let conn_guard = self.conn.lock();
            conn_guard.execute(DELETE_SLOT, params![key])?;
        }
        self.notify(key);
        Ok(())
    }

    fn subscribe(&self, listener: SlotListener) {
        self.listeners.lock().push(listener);
    }
}

//! Persisted study-subject selection.
//!
//! The selected subject follows the user across invocations and is the
//! fallback the completion protocol consults when an alarm carries no
//! subject of its own.

use crate::db::slots::{get_json, set_json, SlotStore};
use anyhow::Result;

/// Slot holding the selected subject id.
pub const SUBJECT_KEY: &str = "focus.selected_subject";

pub fn selected(store: &dyn SlotStore) -> Option<i64> {
    get_json(store, SUBJECT_KEY)
}

pub fn select(store: &dyn SlotStore, id: i64) -> Result<()> {
    set_json(store, SUBJECT_KEY, &id)
}

pub fn clear(store: &dyn SlotStore) -> Result<()> {
    store.remove(SUBJECT_KEY)
}

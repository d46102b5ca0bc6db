//! Completion receipts.
//!
//! A receipt records what happened the last time a completion was processed,
//! so a later `sum` or `focus status` can reconcile against the server after
//! the fact. The slot is overwritten on every completion; it is a
//! side-channel, not a log.

use crate::db::slots::{get_json, set_json, SlotStore};
use crate::libs::timer::Mode;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Slot holding the most recent completion outcome.
pub const RECEIPT_KEY: &str = "focus.receipt";

/// Outcome of the most recently processed completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReceiptKind {
    /// A work session was saved by the completion protocol.
    AutoSave,
    /// A work session was saved by an explicit `focus stop`.
    ManualSave,
    /// The cycle completed with nothing to save (break, typically).
    Complete,
    /// Work completed but no subject was selected; nothing saved.
    NoSubject,
    /// Work completed with less than one whole minute elapsed; nothing saved.
    TooShort,
    /// Saving the session failed; the cycle still advanced.
    CompleteError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde(rename = "type")]
    pub kind: ReceiptKind,
    pub mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    pub at_ms: i64,
}

impl Receipt {
    pub fn write(store: &dyn SlotStore, receipt: &Receipt) -> Result<()> {
        set_json(store, RECEIPT_KEY, receipt)
    }

    pub fn read(store: &dyn SlotStore) -> Option<Receipt> {
        get_json(store, RECEIPT_KEY)
    }

    pub fn clear(store: &dyn SlotStore) -> Result<()> {
        store.remove(RECEIPT_KEY)
    }
}

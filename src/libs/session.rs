//! The seam between the timer core and the Questly account.
//!
//! The completion protocol only ever talks to [`SessionSink`]; the real
//! implementation lives in the API client, and tests substitute a counting
//! mock to pin down the at-most-once guarantee.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A study subject as known to the Questly account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
}

/// Records one completed focus session against the account.
///
/// The core guarantees at most one call per logical completion; the sink
/// itself does not need to deduplicate.
#[async_trait]
pub trait SessionSink: Send + Sync {
    async fn create_session(&self, subject_id: i64, duration_minutes: u64) -> Result<()>;
}

/// Sink used when no Questly account is configured.
///
/// Every save fails, which the completion protocol records as a save error
/// while still advancing the cycle.
pub struct DisconnectedSink;

#[async_trait]
impl SessionSink for DisconnectedSink {
    async fn create_session(&self, _subject_id: i64, _duration_minutes: u64) -> Result<()> {
        Err(crate::msg_error_anyhow!(
            crate::libs::messages::Message::QuestlyNotConfigured
        ))
    }
}

//! The broadcast slot other processes watch for the next completion.
//!
//! Whenever the timer is running and unpaused, the expected completion
//! instant is mirrored into the `focus.alarm` slot so any observer — the
//! watch daemon, or a later CLI invocation — can schedule its own completion
//! check without access to the process that started the cycle. The alarm is
//! a projection of the timer state, never independently authoritative:
//! consumers must re-read the slot when their check fires.

use crate::db::slots::{get_json, set_json, SlotStore};
use crate::libs::clock;
use crate::libs::timer::{Mode, TimerState};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Slot holding the pending completion instant.
pub const ALARM_KEY: &str = "focus.alarm";

/// "If nothing changes, a completion is due at `end_at_ms`."
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alarm {
    pub mode: Mode,
    pub end_at_ms: i64,
    pub subject_id: Option<i64>,
    pub planned_minutes: u64,
}

/// Publishes or retracts the alarm to match the current timer state.
///
/// Running-and-unpaused rewrites the slot with a fresh `end_at`; any other
/// phase deletes it, cancelling checks scheduled from the previous value.
pub fn broadcast(store: &dyn SlotStore, state: &TimerState, subject_id: Option<i64>, now_ms: i64) -> Result<()> {
    if state.is_running() && !state.is_paused() {
        let alarm = Alarm {
            mode: state.mode,
            end_at_ms: now_ms.saturating_add(clock::remaining_seconds(state, now_ms).saturating_mul(1000)),
            subject_id,
            planned_minutes: state.target_minutes,
        };
        set_json(store, ALARM_KEY, &alarm)
    } else {
        store.remove(ALARM_KEY)
    }
}

pub fn read(store: &dyn SlotStore) -> Option<Alarm> {
    get_json(store, ALARM_KEY)
}

pub fn clear(store: &dyn SlotStore) -> Result<()> {
    store.remove(ALARM_KEY)
}

//! Completion arbitration: at most one side effect per finished cycle.
//!
//! When a countdown reaches its deadline, more than one process may notice —
//! a `focus` command sweeping on startup and the `watch` daemon firing at
//! the same instant. Whichever observer acquires the completion lock for the
//! alarm's `end_at` becomes the winner and performs the whole completion:
//! save the session, write the receipt, notify, clear the shared slots and
//! flip the machine into the opposite mode. Every loser silently clears its
//! own stale view and walks away without repeating the side effect.
//!
//! The lock is a read-then-write check against shared storage, valid for 60
//! seconds. The window bounds the damage of a crashed holder (a process
//! killed mid-completion) without wedging future cycles, and the
//! read-then-write race it leaves open is accepted deliberately: two
//! processes squeezing through it costs one duplicate save at worst.

use crate::db::slots::{get_json, set_json, SlotStore};
use crate::libs::alarm::{self, Alarm};
use crate::libs::clock;
use crate::libs::config::FocusConfig;
use crate::libs::messages::Message;
use crate::libs::notify::Notifier;
use crate::libs::receipt::{Receipt, ReceiptKind};
use crate::libs::session::SessionSink;
use crate::libs::subject;
use crate::libs::timer::{Mode, TimerState};
use crate::msg_debug;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Slot holding the completion lock.
pub const LOCK_KEY: &str = "focus.receipt.lock";

/// How long an acquired lock blocks re-processing of the same completion.
pub const LOCK_TTL_MS: i64 = 60_000;

/// A claimed completion: which deadline, when, and by whom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionLock {
    pub end_at_ms: i64,
    pub at_ms: i64,
    pub source: String,
}

/// Tries to claim the completion at `end_at_ms` for `source`.
///
/// Refused only when an existing lock covers the same deadline and is
/// younger than [`LOCK_TTL_MS`]; a stale lock or one for a different
/// deadline is overwritten. Returns `false` when somebody else already
/// handled (or is handling) this completion.
pub fn acquire_lock(store: &dyn SlotStore, end_at_ms: i64, source: &str, now_ms: i64) -> bool {
    if let Some(lock) = get_json::<CompletionLock>(store, LOCK_KEY) {
        if lock.end_at_ms == end_at_ms && now_ms - lock.at_ms < LOCK_TTL_MS {
            return false;
        }
    }
    set_json(
        store,
        LOCK_KEY,
        &CompletionLock {
            end_at_ms,
            at_ms: now_ms,
            source: source.to_string(),
        },
    )
    .is_ok()
}

/// Runs the completion protocol for `alarm`.
///
/// Returns the receipt written by the winner, or `None` when the lock was
/// already held and this observer lost the race. Either way the shared
/// alarm and timer slots are cleared; the loser just does nothing else.
///
/// The winner computes whole elapsed minutes from the persisted timer state
/// evaluated at the alarm's deadline — a late-firing observer must not count
/// the overshoot — falling back to the alarm's planned minutes when the
/// state slot is already gone. A failed save is recorded as a
/// `complete-error` receipt and never blocks the mode flip.
pub async fn handle_completion(
    store: &dyn SlotStore,
    sink: &dyn SessionSink,
    notifier: &Notifier,
    focus: &FocusConfig,
    alarm: &Alarm,
    source: &str,
    now_ms: i64,
) -> Result<Option<Receipt>> {
    if !acquire_lock(store, alarm.end_at_ms, source, now_ms) {
        msg_debug!("Completion at {} already claimed; cleaning up as loser", alarm.end_at_ms);
        alarm::clear(store)?;
        TimerState::clear(store)?;
        return Ok(None);
    }

    let receipt = match alarm.mode {
        Mode::Work => {
            let subject_id = alarm.subject_id.or_else(|| subject::selected(store));
            let minutes = elapsed_minutes_at_deadline(store, alarm);

            if let Some(subject_id) = subject_id.filter(|_| minutes >= 1) {
                match sink.create_session(subject_id, minutes).await {
                    Ok(()) => Receipt {
                        kind: ReceiptKind::AutoSave,
                        mode: Mode::Work,
                        minutes: Some(minutes),
                        subject_id: Some(subject_id),
                        at_ms: now_ms,
                    },
                    Err(err) => {
                        msg_debug!("Session save failed: {}", err);
                        Receipt {
                            kind: ReceiptKind::CompleteError,
                            mode: Mode::Work,
                            minutes: None,
                            subject_id: None,
                            at_ms: now_ms,
                        }
                    }
                }
            } else {
                Receipt {
                    kind: if subject_id.is_none() {
                        ReceiptKind::NoSubject
                    } else {
                        ReceiptKind::TooShort
                    },
                    mode: Mode::Work,
                    minutes: None,
                    subject_id: None,
                    at_ms: now_ms,
                }
            }
        }
        Mode::Break => Receipt {
            kind: ReceiptKind::Complete,
            mode: Mode::Break,
            minutes: None,
            subject_id: None,
            at_ms: now_ms,
        },
    };

    Receipt::write(store, &receipt)?;
    notifier.completed(alarm.mode);

    // Clear the finished cycle and hand the machine the opposite mode with
    // its configured target, idle and ready to start.
    alarm::clear(store)?;
    TimerState::clear(store)?;
    let next_mode = alarm.mode.flip();
    TimerState::new(next_mode, focus.target_for(next_mode)).save(store)?;

    if receipt.kind == ReceiptKind::CompleteError {
        crate::msg_warning!(Message::SessionSaveFailed);
    }

    Ok(Some(receipt))
}

/// Whole minutes elapsed when the deadline fired, not when we noticed.
fn elapsed_minutes_at_deadline(store: &dyn SlotStore, alarm: &Alarm) -> u64 {
    match TimerState::load(store) {
        Some(state) => clock::elapsed_whole_minutes(&state.phase, alarm.end_at_ms),
        None => alarm.planned_minutes,
    }
}

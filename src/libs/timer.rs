//! The persisted work/break timer state machine.
//!
//! One `TimerState` describes one work-or-break cycle. The phase is a tagged
//! enum rather than a pair of booleans, so "paused but not running" and
//! "running without a start timestamp" cannot be constructed at all. Invalid
//! transition requests are silent no-ops returning `false`; the state machine
//! is safe to over-call from imprecise callers.
//!
//! The full state is serialized to the `focus.state` slot after every
//! transition, so a later process rehydrates exactly where this one left off
//! and the clock immediately reports correct elapsed/remaining values.

use crate::db::slots::{get_json, set_json, SlotStore};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Slot holding the serialized timer state.
pub const STATE_KEY: &str = "focus.state";

/// Upper bound for a cycle target. Anything past a full day is a typo, and
/// bounding it keeps the millisecond arithmetic comfortably inside `i64`.
pub const MAX_TARGET_MINUTES: u64 = 1440;

/// Whether the current cycle is a work interval or a break interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// The mode the machine enters after this one completes.
    pub fn flip(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Work => write!(f, "work"),
            Mode::Break => write!(f, "break"),
        }
    }
}

/// The three reachable phases of a cycle.
///
/// Timestamps are milliseconds since the Unix epoch. `paused_accum_ms` is
/// the total time spent paused so far; it only grows, and only on resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running {
        start_at_ms: i64,
        paused_accum_ms: i64,
    },
    Paused {
        start_at_ms: i64,
        paused_accum_ms: i64,
        pause_at_ms: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub target_minutes: u64,
    #[serde(flatten)]
    pub phase: Phase,
}

impl TimerState {
    /// A fresh idle cycle. The target is clamped to the valid range.
    pub fn new(mode: Mode, target_minutes: u64) -> Self {
        TimerState {
            mode,
            target_minutes: target_minutes.clamp(1, MAX_TARGET_MINUTES),
            phase: Phase::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. } | Phase::Paused { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, Phase::Paused { .. })
    }

    /// Begins the countdown. Valid only from idle.
    pub fn start(&mut self, now_ms: i64) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = Phase::Running {
            start_at_ms: now_ms,
            paused_accum_ms: 0,
        };
        true
    }

    /// Freezes the countdown at the current instant. Valid only while
    /// running and not already paused.
    pub fn pause(&mut self, now_ms: i64) -> bool {
        match self.phase {
            Phase::Running { start_at_ms, paused_accum_ms } => {
                self.phase = Phase::Paused {
                    start_at_ms,
                    paused_accum_ms,
                    pause_at_ms: now_ms,
                };
                true
            }
            _ => false,
        }
    }

    /// Resumes a paused countdown, folding the pause interval into
    /// `paused_accum_ms` so elapsed time picks up where it froze.
    pub fn resume(&mut self, now_ms: i64) -> bool {
        match self.phase {
            Phase::Paused {
                start_at_ms,
                paused_accum_ms,
                pause_at_ms,
            } => {
                self.phase = Phase::Running {
                    start_at_ms,
                    paused_accum_ms: paused_accum_ms + (now_ms - pause_at_ms).max(0),
                };
                true
            }
            _ => false,
        }
    }

    /// Returns to idle from any phase. Mode and target are untouched.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Changes the cycle mode. Valid only while idle.
    pub fn switch_mode(&mut self, next: Mode) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.mode = next;
        true
    }

    /// Changes the target length, clamped to the valid range. Rejected
    /// while actively running; permitted while idle or paused.
    pub fn set_target_minutes(&mut self, minutes: u64) -> bool {
        if matches!(self.phase, Phase::Running { .. }) {
            return false;
        }
        self.target_minutes = minutes.clamp(1, MAX_TARGET_MINUTES);
        true
    }

    /// Rehydrates the persisted cycle, if any. A missing or malformed slot
    /// reads as `None`; a persisted target outside the range the constructor
    /// clamps to is rejected the same way.
    pub fn load(store: &dyn SlotStore) -> Option<TimerState> {
        let state: TimerState = get_json(store, STATE_KEY)?;
        if state.target_minutes < 1 || state.target_minutes > MAX_TARGET_MINUTES {
            return None;
        }
        Some(state)
    }

    /// Persists the full state, replacing the previous slot value.
    pub fn save(&self, store: &dyn SlotStore) -> Result<()> {
        set_json(store, STATE_KEY, self)
    }

    /// Removes the persisted cycle.
    pub fn clear(store: &dyn SlotStore) -> Result<()> {
        store.remove(STATE_KEY)
    }
}

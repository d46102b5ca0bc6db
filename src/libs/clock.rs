//! Drift-free countdown math.
//!
//! Elapsed and remaining time are derived from wall-clock timestamps, never
//! from accumulated ticks, so accuracy does not depend on how often anyone
//! looks at the timer. All functions are pure; callers pass `now_ms`
//! explicitly, which also keeps tests deterministic.

use crate::libs::timer::{Phase, TimerState};
use chrono::Utc;

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Milliseconds spent actually running: wall time minus accumulated pauses,
/// frozen at the pause instant while paused. Never negative.
pub fn elapsed_ms(phase: &Phase, now_ms: i64) -> i64 {
    match *phase {
        Phase::Idle => 0,
        Phase::Running { start_at_ms, paused_accum_ms } => (now_ms - start_at_ms - paused_accum_ms).max(0),
        Phase::Paused {
            start_at_ms,
            paused_accum_ms,
            pause_at_ms,
        } => (pause_at_ms - start_at_ms - paused_accum_ms).max(0),
    }
}

pub fn elapsed_seconds(phase: &Phase, now_ms: i64) -> i64 {
    elapsed_ms(phase, now_ms) / 1000
}

/// Total length of a cycle in seconds. Saturates instead of wrapping so an
/// out-of-range persisted target can never panic a status read.
pub fn total_seconds(target_minutes: u64) -> i64 {
    i64::try_from(target_minutes.saturating_mul(60)).unwrap_or(i64::MAX)
}

/// Seconds until the target is reached, clamped at zero.
pub fn remaining_seconds(state: &TimerState, now_ms: i64) -> i64 {
    (total_seconds(state.target_minutes) - elapsed_seconds(&state.phase, now_ms)).max(0)
}

/// Whole minutes of elapsed focus time, the unit the Questly API stores.
pub fn elapsed_whole_minutes(phase: &Phase, now_ms: i64) -> u64 {
    (elapsed_seconds(phase, now_ms) / 60).max(0) as u64
}

/// Formats a second count as `HH:MM:SS` for the status display.
pub fn display(seconds: i64) -> String {
    let secs = seconds.max(0);
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use questly::libs::clock;
    use questly::libs::timer::{Mode, Phase, TimerState};

    const T0: i64 = 1_700_000_000_000;
    const MINUTE_MS: i64 = 60_000;

    #[test]
    fn test_idle_has_no_elapsed_time() {
        assert_eq!(clock::elapsed_ms(&Phase::Idle, T0), 0);
    }

    #[test]
    fn test_elapsed_is_wall_time_minus_pauses() {
        let phase = Phase::Running {
            start_at_ms: T0,
            paused_accum_ms: 2 * MINUTE_MS,
        };
        assert_eq!(clock::elapsed_ms(&phase, T0 + 10 * MINUTE_MS), 8 * MINUTE_MS);
        assert_eq!(clock::elapsed_seconds(&phase, T0 + 10 * MINUTE_MS), 8 * 60);
    }

    #[test]
    fn test_elapsed_frozen_while_paused() {
        let phase = Phase::Paused {
            start_at_ms: T0,
            paused_accum_ms: 0,
            pause_at_ms: T0 + 4 * MINUTE_MS,
        };
        // However late we look, the clock reads the pause instant.
        assert_eq!(clock::elapsed_ms(&phase, T0 + 60 * MINUTE_MS), 4 * MINUTE_MS);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let phase = Phase::Running {
            start_at_ms: T0,
            paused_accum_ms: 0,
        };
        // A clock read before the recorded start clamps at zero.
        assert_eq!(clock::elapsed_ms(&phase, T0 - MINUTE_MS), 0);
    }

    #[test]
    fn test_remaining_counts_down_and_clamps() {
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        assert_eq!(clock::remaining_seconds(&state, T0), 25 * 60);
        assert_eq!(clock::remaining_seconds(&state, T0 + 10 * MINUTE_MS), 15 * 60);
        assert_eq!(clock::remaining_seconds(&state, T0 + 30 * MINUTE_MS), 0);
    }

    #[test]
    fn test_remaining_survives_rehydration() {
        // A 25-minute cycle persisted, forgotten, and rehydrated 10 minutes
        // later still shows 15 minutes left; no tick was ever counted.
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        let json = serde_json::to_string(&state).unwrap();

        let rehydrated: TimerState = serde_json::from_str(&json).unwrap();
        assert_eq!(clock::remaining_seconds(&rehydrated, T0 + 10 * MINUTE_MS), 15 * 60);
    }

    #[test]
    fn test_absurd_target_never_overflows() {
        // A target far past the clamp can still appear in a hand-built state;
        // the arithmetic saturates instead of wrapping or panicking.
        let state = TimerState {
            mode: Mode::Work,
            target_minutes: u64::MAX,
            phase: Phase::Running {
                start_at_ms: T0,
                paused_accum_ms: 0,
            },
        };
        assert_eq!(clock::total_seconds(u64::MAX), i64::MAX);
        assert!(clock::remaining_seconds(&state, T0 + MINUTE_MS) > 0);
    }

    #[test]
    fn test_whole_minutes_truncate() {
        let phase = Phase::Running {
            start_at_ms: T0,
            paused_accum_ms: 0,
        };
        assert_eq!(clock::elapsed_whole_minutes(&phase, T0 + 59_000), 0);
        assert_eq!(clock::elapsed_whole_minutes(&phase, T0 + 60_000), 1);
        assert_eq!(clock::elapsed_whole_minutes(&phase, T0 + 25 * MINUTE_MS + 59_000), 25);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(clock::display(0), "00:00:00");
        assert_eq!(clock::display(59), "00:00:59");
        assert_eq!(clock::display(25 * 60), "00:25:00");
        assert_eq!(clock::display(3 * 3600 + 4 * 60 + 5), "03:04:05");
        assert_eq!(clock::display(-10), "00:00:00");
    }
}

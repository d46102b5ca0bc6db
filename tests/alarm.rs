#[cfg(test)]
mod tests {
    use questly::db::slots::Slots;
    use questly::libs::alarm;
    use questly::libs::timer::{Mode, TimerState};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    const T0: i64 = 1_700_000_000_000;
    const MINUTE_MS: i64 = 60_000;

    struct AlarmTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for AlarmTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            AlarmTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_running_timer_publishes_deadline(_ctx: &mut AlarmTestContext) {
        let store = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);

        alarm::broadcast(&store, &state, Some(7), T0).unwrap();

        let pending = alarm::read(&store).unwrap();
        assert_eq!(pending.mode, Mode::Work);
        assert_eq!(pending.end_at_ms, T0 + 25 * MINUTE_MS);
        assert_eq!(pending.subject_id, Some(7));
        assert_eq!(pending.planned_minutes, 25);
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_pause_retracts_the_alarm(_ctx: &mut AlarmTestContext) {
        let store = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        alarm::broadcast(&store, &state, None, T0).unwrap();
        assert!(alarm::read(&store).is_some());

        state.pause(T0 + 5 * MINUTE_MS);
        alarm::broadcast(&store, &state, None, T0 + 5 * MINUTE_MS).unwrap();
        assert_eq!(alarm::read(&store), None);
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_resume_pushes_deadline_out_by_pause_length(_ctx: &mut AlarmTestContext) {
        let store = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        state.pause(T0 + 5 * MINUTE_MS);
        state.resume(T0 + 8 * MINUTE_MS);

        alarm::broadcast(&store, &state, None, T0 + 8 * MINUTE_MS).unwrap();

        // 20 minutes of work remained when the pause began, so the fresh
        // deadline is 20 minutes out from the resume instant.
        let pending = alarm::read(&store).unwrap();
        assert_eq!(pending.end_at_ms, T0 + 28 * MINUTE_MS);
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_deadline_saturates_for_absurd_targets(_ctx: &mut AlarmTestContext) {
        let store = Slots::new().unwrap();
        let state = TimerState {
            mode: Mode::Work,
            target_minutes: u64::MAX,
            phase: questly::libs::timer::Phase::Running {
                start_at_ms: T0,
                paused_accum_ms: 0,
            },
        };

        alarm::broadcast(&store, &state, None, T0).unwrap();

        // The deadline pins at the representable maximum instead of wrapping
        // into the past.
        let pending = alarm::read(&store).unwrap();
        assert_eq!(pending.end_at_ms, i64::MAX);
    }

    #[test_context(AlarmTestContext)]
    #[test]
    fn test_idle_timer_retracts_the_alarm(_ctx: &mut AlarmTestContext) {
        let store = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        alarm::broadcast(&store, &state, None, T0).unwrap();

        state.reset();
        alarm::broadcast(&store, &state, None, T0 + MINUTE_MS).unwrap();
        assert_eq!(alarm::read(&store), None);
    }
}

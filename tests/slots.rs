#[cfg(test)]
mod tests {
    use questly::db::slots::{get_json, set_json, SlotStore, Slots};
    use questly::libs::timer::{Mode, TimerState};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SlotsTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for SlotsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SlotsTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_missing_slot_reads_as_none(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        assert_eq!(slots.get_raw("focus.state").unwrap(), None);
        assert_eq!(get_json::<TimerState>(&slots, "focus.state"), None);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_set_and_get_roundtrip(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        let state = TimerState::new(Mode::Work, 25);
        set_json(&slots, "focus.state", &state).unwrap();

        let read: TimerState = get_json(&slots, "focus.state").unwrap();
        assert_eq!(read, state);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_write_replaces_whole_value(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        set_json(&slots, "focus.state", &TimerState::new(Mode::Work, 25)).unwrap();
        set_json(&slots, "focus.state", &TimerState::new(Mode::Break, 5)).unwrap();

        let read: TimerState = get_json(&slots, "focus.state").unwrap();
        assert_eq!(read.mode, Mode::Break);
        assert_eq!(read.target_minutes, 5);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_remove_deletes_the_slot(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        set_json(&slots, "focus.selected_subject", &7i64).unwrap();
        slots.remove("focus.selected_subject").unwrap();
        assert_eq!(get_json::<i64>(&slots, "focus.selected_subject"), None);
        // Removing an absent slot is not an error.
        slots.remove("focus.selected_subject").unwrap();
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_malformed_value_reads_as_none(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        slots.set_raw("focus.state", "not json at all").unwrap();
        assert_eq!(get_json::<TimerState>(&slots, "focus.state"), None);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_visible_across_store_instances(_ctx: &mut SlotsTestContext) {
        // Two instances model two processes sharing the database file.
        let writer = Slots::new().unwrap();
        set_json(&writer, "focus.selected_subject", &42i64).unwrap();

        let reader = Slots::new().unwrap();
        assert_eq!(get_json::<i64>(&reader, "focus.selected_subject"), Some(42));
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_timer_state_save_and_load(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(1_700_000_000_000);
        state.save(&slots).unwrap();

        assert_eq!(TimerState::load(&slots), Some(state));

        TimerState::clear(&slots).unwrap();
        assert_eq!(TimerState::load(&slots), None);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_persisted_zero_target_is_rejected(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        // A hand-edited or corrupted slot with an impossible target must not
        // rehydrate into a zero-length cycle.
        slots
            .set_raw("focus.state", r#"{"mode":"work","target_minutes":0,"phase":"idle"}"#)
            .unwrap();
        assert_eq!(TimerState::load(&slots), None);

        // Same for a target past the upper clamp.
        slots
            .set_raw("focus.state", r#"{"mode":"work","target_minutes":18446744073709551615,"phase":"idle"}"#)
            .unwrap();
        assert_eq!(TimerState::load(&slots), None);
    }

    #[test_context(SlotsTestContext)]
    #[test]
    fn test_subscribers_hear_writes_and_removes(_ctx: &mut SlotsTestContext) {
        let slots = Slots::new().unwrap();
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        slots.subscribe(Box::new(move |key| {
            assert_eq!(key, "focus.alarm");
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        slots.set_raw("focus.alarm", "{}").unwrap();
        slots.remove("focus.alarm").unwrap();
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }
}

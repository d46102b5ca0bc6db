#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use questly::db::slots::{set_json, Slots};
    use questly::libs::alarm::{Alarm, ALARM_KEY};
    use questly::libs::config::{FocusConfig, WatcherConfig};
    use questly::libs::notify::Notifier;
    use questly::libs::session::SessionSink;
    use questly::libs::timer::{Mode, TimerState};
    use questly::libs::watcher::AlarmWatcher;
    use std::sync::Arc;
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    const T0: i64 = 1_700_000_000_000;
    const MINUTE_MS: i64 = 60_000;

    struct WatcherTestContext {
        _temp_dir: TempDir,
    }

    impl AsyncTestContext for WatcherTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            WatcherTestContext { _temp_dir: temp_dir }
        }
    }

    /// Shares its call log across clones so tests can keep a handle after
    /// moving the sink into the watcher.
    #[derive(Clone, Default)]
    struct CountingSink {
        calls: Arc<Mutex<Vec<(i64, u64)>>>,
    }

    #[async_trait]
    impl SessionSink for CountingSink {
        async fn create_session(&self, subject_id: i64, duration_minutes: u64) -> Result<()> {
            self.calls.lock().push((subject_id, duration_minutes));
            Ok(())
        }
    }

    fn watcher_under_test(sink: CountingSink) -> AlarmWatcher<Slots, CountingSink> {
        AlarmWatcher::new(
            WatcherConfig { poll_interval: 10 },
            FocusConfig {
                work_minutes: 25,
                break_minutes: 5,
                sound: false,
            },
            Slots::new().unwrap(),
            sink,
            Notifier::new(false),
        )
    }

    fn expired_alarm(subject_id: Option<i64>) -> Alarm {
        Alarm {
            mode: Mode::Work,
            end_at_ms: T0 + 25 * MINUTE_MS,
            subject_id,
            planned_minutes: 25,
        }
    }

    #[test_context(WatcherTestContext)]
    #[tokio::test]
    async fn test_vanished_alarm_is_skipped(_ctx: &mut WatcherTestContext) {
        let sink = CountingSink::default();
        let watcher = watcher_under_test(sink.clone());

        // The alarm was cancelled between scheduling and firing.
        let fired = watcher.check_due(&expired_alarm(Some(7))).await.unwrap();
        assert!(!fired);
        assert!(sink.calls.lock().is_empty());
    }

    #[test_context(WatcherTestContext)]
    #[tokio::test]
    async fn test_replaced_alarm_is_skipped(_ctx: &mut WatcherTestContext) {
        let sink = CountingSink::default();
        let watcher = watcher_under_test(sink.clone());
        let scheduled = expired_alarm(Some(7));

        // Another process rewrote the slot with a later deadline.
        let slots = Slots::new().unwrap();
        let replaced = Alarm {
            end_at_ms: scheduled.end_at_ms + 10 * MINUTE_MS,
            ..scheduled.clone()
        };
        set_json(&slots, ALARM_KEY, &replaced).unwrap();

        let fired = watcher.check_due(&scheduled).await.unwrap();
        assert!(!fired);
        assert!(sink.calls.lock().is_empty());
    }

    #[test_context(WatcherTestContext)]
    #[tokio::test]
    async fn test_matching_alarm_runs_the_completion(_ctx: &mut WatcherTestContext) {
        let sink = CountingSink::default();
        let watcher = watcher_under_test(sink.clone());
        let scheduled = expired_alarm(Some(7));

        let slots = Slots::new().unwrap();
        let mut state = TimerState::new(Mode::Work, 25);
        state.start(T0);
        state.save(&slots).unwrap();
        set_json(&slots, ALARM_KEY, &scheduled).unwrap();

        let fired = watcher.check_due(&scheduled).await.unwrap();
        assert!(fired);
        assert_eq!(*sink.calls.lock(), vec![(7, 25)]);

        // The watcher flipped the machine like any other winner would.
        let next = TimerState::load(&slots).unwrap();
        assert!(next.is_idle());
        assert_eq!(next.mode, Mode::Break);
    }
}

#[cfg(test)]
mod tests {
    use questly::api::questly::QuestlyConfig;
    use questly::libs::config::{Config, FocusConfig, WatcherConfig};
    use questly::libs::timer::Mode;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config_has_no_sections(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.questly.is_none());
        assert!(config.focus.is_none());
        assert!(config.watcher.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() should return the defaults.
        let config = Config::read().unwrap();
        assert!(config.questly.is_none());
        assert_eq!(config.focus(), FocusConfig::default());
        assert_eq!(config.watcher(), WatcherConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(_ctx: &mut ConfigTestContext) {
        let config = Config {
            questly: Some(QuestlyConfig {
                email: "student@example.com".to_string(),
                api_url: "https://questly.example.com/api".to_string(),
            }),
            focus: Some(FocusConfig {
                work_minutes: 50,
                break_minutes: 10,
                sound: false,
            }),
            watcher: Some(WatcherConfig { poll_interval: 500 }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        let questly = read_config.questly.as_ref().unwrap();
        assert_eq!(questly.email, "student@example.com");
        assert_eq!(questly.api_url, "https://questly.example.com/api");
        assert_eq!(read_config.focus(), FocusConfig {
            work_minutes: 50,
            break_minutes: 10,
            sound: false,
        });
        assert_eq!(read_config.watcher().poll_interval, 500);
    }

    #[test]
    fn test_focus_defaults_are_classic_pomodoro() {
        let focus = FocusConfig::default();
        assert_eq!(focus.work_minutes, 25);
        assert_eq!(focus.break_minutes, 5);
        assert!(focus.sound);
    }

    #[test]
    fn test_target_for_clamps_to_one_minute() {
        let focus = FocusConfig {
            work_minutes: 0,
            break_minutes: 0,
            sound: false,
        };
        assert_eq!(focus.target_for(Mode::Work), 1);
        assert_eq!(focus.target_for(Mode::Break), 1);
    }

    #[test]
    fn test_watcher_default_poll_interval() {
        assert_eq!(WatcherConfig::default().poll_interval, 1000);
    }
}

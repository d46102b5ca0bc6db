//! Configuration management for the questly application.
//!
//! Settings live in a JSON `config.json` under the platform data directory.
//! Every module is optional: a missing file or a missing section falls back
//! to defaults, so the application runs with zero setup. The `init` command
//! drives the interactive wizard below to create or update the file.

use super::data_storage::DataStorage;
use crate::api::questly::QuestlyConfig;
use crate::libs::messages::Message;
use crate::libs::timer::{Mode, MAX_TARGET_MINUTES};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Represents a configurable module in the application.
///
/// Used during interactive setup to display available modules and route the
/// user's selection to the right section wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier for the module used in configuration routing
    pub key: String,
    /// Display name shown to users during interactive setup
    pub name: String,
}

/// Focus cycle settings.
///
/// Targets are whole minutes and are clamped to the timer's valid range
/// wherever they reach it. `sound` gates the completion chime only; it never
/// affects whether a session is saved.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FocusConfig {
    /// Work interval length in minutes.
    pub work_minutes: u64,
    /// Break interval length in minutes.
    pub break_minutes: u64,
    /// Whether to ring the terminal bell when a cycle completes.
    pub sound: bool,
}

impl FocusConfig {
    /// The configured target for a given mode, clamped to the timer's valid
    /// range.
    pub fn target_for(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_minutes.clamp(1, MAX_TARGET_MINUTES),
            Mode::Break => self.break_minutes.clamp(1, MAX_TARGET_MINUTES),
        }
    }
}

impl Default for FocusConfig {
    /// Classic pomodoro defaults: 25 minutes of work, 5 of break.
    fn default() -> Self {
        FocusConfig {
            work_minutes: 25,
            break_minutes: 5,
            sound: true,
        }
    }
}

/// Background watcher settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WatcherConfig {
    /// Poll interval in milliseconds for re-reading the alarm slot.
    ///
    /// The watcher re-reads the persisted alarm at this cadence so rewrites
    /// from other processes are picked up promptly without burning CPU.
    /// Values between 500-2000ms are a good balance.
    pub poll_interval: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        WatcherConfig { poll_interval: 1000 }
    }
}

/// Main configuration container for the entire application.
///
/// All sections are optional so unconfigured modules are omitted from the
/// JSON output and never block the rest of the application.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Questly account/API connection settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questly: Option<QuestlyConfig>,

    /// Focus cycle lengths and completion chime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusConfig>,

    /// Background watcher polling behavior.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watcher: Option<WatcherConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults if none
    /// exists.
    ///
    /// A present-but-unparsable file is an error; silently replacing a
    /// user's edited config would lose data.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The focus section, or defaults when unconfigured.
    pub fn focus(&self) -> FocusConfig {
        self.focus.clone().unwrap_or_default()
    }

    /// The watcher section, or defaults when unconfigured.
    pub fn watcher(&self) -> WatcherConfig {
        self.watcher.clone().unwrap_or_default()
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Presents the available modules, pre-fills existing values as
    /// defaults, and returns the updated configuration for saving. Modules
    /// the user does not select keep their previous settings.
    pub fn init() -> Result<Self> {
        let mut config = match Self::read() {
            Ok(config) => config,
            Err(_) => Config::default(),
        };

        let node_descriptions = vec![
            QuestlyConfig::module(),
            ConfigModule {
                key: "focus".to_string(),
                name: "Focus cycle".to_string(),
            },
            ConfigModule {
                key: "watcher".to_string(),
                name: "Watcher".to_string(),
            },
        ];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "questly" => config.questly = Some(QuestlyConfig::init(&config.questly)?),

                "focus" => {
                    let default = config.focus.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleFocus);
                    config.focus = Some(FocusConfig {
                        work_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptWorkMinutes.to_string())
                            .default(default.work_minutes)
                            .interact_text()?,

                        break_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBreakMinutes.to_string())
                            .default(default.break_minutes)
                            .interact_text()?,

                        sound: Confirm::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptSoundEnabled.to_string())
                            .default(default.sound)
                            .interact()?,
                    });
                }

                "watcher" => {
                    let default = config.watcher.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleWatcher);
                    config.watcher = Some(WatcherConfig {
                        poll_interval: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptPollInterval.to_string())
                            .default(default.poll_interval)
                            .interact_text()?,
                    });
                }
                _ => {} // Unknown module keys are safely ignored
            }
        }

        Ok(config)
    }
}

//! Display implementation for questly application messages.
//!
//! All user-facing text lives here, keyed by the `Message` enum, so wording
//! stays in one place and call sites stay type-checked.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TIMER MESSAGES ===
            Message::WorkStarted => "Work started. Stay focused!".to_string(),
            Message::BreakStarted => "Break started. Relax!".to_string(),
            Message::TimerPaused => "Paused".to_string(),
            Message::TimerResumed => "Resumed".to_string(),
            Message::TimerReset => "Timer reset".to_string(),
            Message::TimerAlreadyRunning => "A cycle is already running".to_string(),
            Message::TimerNotRunning => "No cycle is running".to_string(),
            Message::TimerNotPaused => "The timer is not paused".to_string(),
            Message::ModeSwitched(mode) => format!("Mode set to {}", mode),
            Message::ModeSwitchRejected => "Mode can only change while the timer is idle".to_string(),
            Message::TargetUpdated(minutes) => format!("Target set to {} minutes", minutes),
            Message::TargetRejectedWhileRunning => "Target cannot change while the timer is running (pause first)".to_string(),
            Message::StatusIdle(mode, target) => format!("Idle ({} mode, {} minute target)", mode, target),
            Message::StatusRunning(display, mode) => format!("{} remaining ({})", display, mode),
            Message::StatusPaused(display, mode) => format!("{} remaining ({}, paused)", display, mode),
            Message::LastOutcome(outcome) => format!("Last completion: {}", outcome),

            // === COMPLETION MESSAGES ===
            Message::WorkSessionComplete => "Work session complete. Time for a break.".to_string(),
            Message::BreakOver => "Break over. Back to work!".to_string(),
            Message::SessionSaved(minutes) => format!("Session saved ({} min)", minutes),
            Message::SessionSaveFailed => "Could not save the session; the timer moved on anyway".to_string(),
            Message::NotEnoughElapsed => "Not enough time elapsed to save (need at least 1 minute)".to_string(),
            Message::SelectSubjectToSave => "Select a subject to save this session".to_string(),

            // === SUBJECT MESSAGES ===
            Message::SubjectSelected(name) => format!("Subject selected: {}", name),
            Message::SubjectCleared => "Subject selection cleared".to_string(),
            Message::SubjectNotFound(id) => format!("No subject with id {}", id),
            Message::NoSubjects => "Your account has no subjects yet".to_string(),
            Message::SubjectSelectionStale => "The selected subject no longer exists; selection cleared".to_string(),

            // === WATCHER MESSAGES ===
            Message::WatcherStarted => "Watcher is running (Ctrl-C to stop)".to_string(),
            Message::WatcherStopped => "Watcher stopped".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleFocus => "Focus cycle settings".to_string(),
            Message::ConfigModuleWatcher => "Watcher settings".to_string(),
            Message::ConfigModuleQuestly => "Questly account settings".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptWorkMinutes => "Work interval in minutes".to_string(),
            Message::PromptBreakMinutes => "Break interval in minutes".to_string(),
            Message::PromptSoundEnabled => "Ring the bell when a cycle completes?".to_string(),
            Message::PromptPollInterval => "Watcher poll interval in milliseconds".to_string(),
            Message::PromptQuestlyEmail => "Enter your Questly account email".to_string(),
            Message::PromptQuestlyApiUrl => "Enter the Questly API URL".to_string(),
            Message::PromptQuestlyPassword => "Enter your Questly password".to_string(),
            Message::PromptSelectSubject => "Select a subject".to_string(),

            // === API MESSAGES ===
            Message::LoginFailed => "Login failed".to_string(),
            Message::WrongPasswordTimes(count) => format!("You entered the wrong password {} times!", count),
            Message::ApiRequestFailed(status) => format!("Questly API request failed: {}", status),
            Message::QuestlyNotConfigured => "No Questly account configured; run `questly init` first".to_string(),
            Message::SummaryHeader => "Focus summary".to_string(),
        };
        write!(f, "{}", text)
    }
}

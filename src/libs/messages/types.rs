#[derive(Debug, Clone)]
pub enum Message {
    // === TIMER MESSAGES ===
    WorkStarted,
    BreakStarted,
    TimerPaused,
    TimerResumed,
    TimerReset,
    TimerAlreadyRunning,
    TimerNotRunning,
    TimerNotPaused,
    ModeSwitched(String),
    ModeSwitchRejected,
    TargetUpdated(u64),
    TargetRejectedWhileRunning,
    StatusIdle(String, u64),           // mode, target minutes
    StatusRunning(String, String),     // remaining display, mode
    StatusPaused(String, String),      // remaining display, mode
    LastOutcome(String),               // receipt description

    // === COMPLETION MESSAGES ===
    WorkSessionComplete,
    BreakOver,
    SessionSaved(u64),  // minutes
    SessionSaveFailed,
    NotEnoughElapsed,
    SelectSubjectToSave,

    // === SUBJECT MESSAGES ===
    SubjectSelected(String),
    SubjectCleared,
    SubjectNotFound(i64),
    NoSubjects,
    SubjectSelectionStale,

    // === WATCHER MESSAGES ===
    WatcherStarted,
    WatcherStopped,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleFocus,
    ConfigModuleWatcher,
    ConfigModuleQuestly,
    PromptSelectModules,
    PromptWorkMinutes,
    PromptBreakMinutes,
    PromptSoundEnabled,
    PromptPollInterval,
    PromptQuestlyEmail,
    PromptQuestlyApiUrl,
    PromptQuestlyPassword,
    PromptSelectSubject,

    // === API MESSAGES ===
    LoginFailed,
    WrongPasswordTimes(i32),
    ApiRequestFailed(String), // status
    QuestlyNotConfigured,
    SummaryHeader,
}

//! The `focus` command family: the foreground face of the timer.
//!
//! Every invocation follows the same shape: open the shared slot store,
//! sweep any completion that came due while no process was looking, rehydrate
//! the persisted cycle, apply one transition, persist it and re-broadcast the
//! alarm. The countdown itself lives entirely in the stored timestamps; these
//! commands only ever observe it.

use crate::api::questly::QuestlySink;
use crate::db::slots::{SlotStore, Slots};
use crate::libs::alarm;
use crate::libs::arbiter::{self, LOCK_KEY};
use crate::libs::clock;
use crate::libs::config::{Config, FocusConfig};
use crate::libs::messages::Message;
use crate::libs::notify::Notifier;
use crate::libs::receipt::{Receipt, ReceiptKind};
use crate::libs::session::{DisconnectedSink, SessionSink};
use crate::libs::subject;
use crate::libs::timer::{Mode, Phase, TimerState};
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

#[derive(Debug, Args)]
pub struct FocusArgs {
    #[command(subcommand)]
    command: FocusCommand,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Work,
    Break,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Work => Mode::Work,
            ModeArg::Break => Mode::Break,
        }
    }
}

#[derive(Debug, Subcommand)]
enum FocusCommand {
    #[command(about = "Start the countdown")]
    Start {
        /// Override the target length in minutes for this cycle
        #[arg(short, long)]
        minutes: Option<u64>,
    },
    #[command(about = "Freeze the countdown")]
    Pause,
    #[command(about = "Continue a paused countdown")]
    Resume,
    #[command(about = "Return to idle without saving")]
    Reset,
    #[command(about = "Show the current cycle and the last completion")]
    Status,
    #[command(about = "Switch between work and break (idle only)")]
    Mode { mode: ModeArg },
    #[command(about = "Change the target length in minutes")]
    Target { minutes: u64 },
    #[command(about = "Stop now and save the elapsed work session")]
    Stop,
}

pub async fn cmd(focus_args: FocusArgs) -> Result<()> {
    let store = Slots::new()?;
    let config = Config::read()?;
    let focus = config.focus();
    let notifier = Notifier::new(focus.sound);
    let sink: Box<dyn SessionSink> = match &config.questly {
        Some(questly) => Box::new(QuestlySink::new(questly)),
        None => Box::new(DisconnectedSink),
    };

    // A completion that came due while no process was running is handled
    // before the requested transition, so the user always acts on the cycle
    // the machine is really in.
    sweep_due(&store, sink.as_ref(), &notifier, &focus).await?;

    let mut state = TimerState::load(&store).unwrap_or_else(|| TimerState::new(Mode::Work, focus.target_for(Mode::Work)));
    let now = clock::now_ms();

    match focus_args.command {
        FocusCommand::Start { minutes } => {
            if let Some(minutes) = minutes {
                state.set_target_minutes(minutes);
            }
            if state.start(now) {
                // Leftovers from the previous cycle must not shadow this one.
                Receipt::clear(&store)?;
                store.remove(LOCK_KEY)?;
                state.save(&store)?;
                alarm::broadcast(&store, &state, subject::selected(&store), now)?;
                match state.mode {
                    Mode::Work => msg_success!(Message::WorkStarted),
                    Mode::Break => msg_success!(Message::BreakStarted),
                }
            } else {
                msg_warning!(Message::TimerAlreadyRunning);
            }
        }

        FocusCommand::Pause => {
            if state.pause(now) {
                state.save(&store)?;
                alarm::broadcast(&store, &state, subject::selected(&store), now)?;
                msg_print!(Message::TimerPaused);
            } else if state.is_paused() {
                msg_info!(Message::TimerPaused);
            } else {
                msg_warning!(Message::TimerNotRunning);
            }
        }

        FocusCommand::Resume => {
            if state.resume(now) {
                state.save(&store)?;
                alarm::broadcast(&store, &state, subject::selected(&store), now)?;
                msg_print!(Message::TimerResumed);
            } else {
                msg_warning!(Message::TimerNotPaused);
            }
        }

        FocusCommand::Reset => {
            state.reset();
            state.save(&store)?;
            alarm::broadcast(&store, &state, None, now)?;
            msg_print!(Message::TimerReset);
        }

        FocusCommand::Status => {
            match state.phase {
                Phase::Idle => msg_print!(Message::StatusIdle(state.mode.to_string(), state.target_minutes)),
                Phase::Running { .. } => msg_print!(Message::StatusRunning(
                    clock::display(clock::remaining_seconds(&state, now)),
                    state.mode.to_string()
                )),
                Phase::Paused { .. } => msg_print!(Message::StatusPaused(
                    clock::display(clock::remaining_seconds(&state, now)),
                    state.mode.to_string()
                )),
            }
            if let Some(receipt) = Receipt::read(&store) {
                msg_print!(Message::LastOutcome(describe(&receipt)));
            }
        }

        FocusCommand::Mode { mode } => {
            let next: Mode = mode.into();
            if state.switch_mode(next) {
                state.set_target_minutes(focus.target_for(next));
                state.save(&store)?;
                msg_success!(Message::ModeSwitched(next.to_string()));
            } else {
                msg_warning!(Message::ModeSwitchRejected);
            }
        }

        FocusCommand::Target { minutes } => {
            if state.set_target_minutes(minutes) {
                state.save(&store)?;
                alarm::broadcast(&store, &state, subject::selected(&store), now)?;
                msg_success!(Message::TargetUpdated(state.target_minutes));
            } else {
                msg_warning!(Message::TargetRejectedWhileRunning);
            }
        }

        FocusCommand::Stop => {
            stop_and_save(&store, sink.as_ref(), &mut state, now).await?;
        }
    }

    Ok(())
}

/// Handles an alarm whose deadline has already passed.
async fn sweep_due(store: &dyn SlotStore, sink: &dyn SessionSink, notifier: &Notifier, focus: &FocusConfig) -> Result<()> {
    if let Some(pending) = alarm::read(store) {
        let now = clock::now_ms();
        if pending.end_at_ms <= now {
            arbiter::handle_completion(store, sink, notifier, focus, &pending, "cli", now).await?;
        }
    }
    Ok(())
}

/// Ends the cycle early, saving the elapsed work time when there is a
/// subject and at least one whole minute on the clock. The mode does not
/// flip; an early stop is an interruption, not a completion.
async fn stop_and_save(store: &dyn SlotStore, sink: &dyn SessionSink, state: &mut TimerState, now: i64) -> Result<()> {
    if !state.is_running() {
        msg_warning!(Message::TimerNotRunning);
        return Ok(());
    }

    if state.mode == Mode::Work {
        let minutes = clock::elapsed_whole_minutes(&state.phase, now);
        match subject::selected(store) {
            Some(subject_id) if minutes >= 1 => match sink.create_session(subject_id, minutes).await {
                Ok(()) => {
                    Receipt::write(
                        store,
                        &Receipt {
                            kind: ReceiptKind::ManualSave,
                            mode: Mode::Work,
                            minutes: Some(minutes),
                            subject_id: Some(subject_id),
                            at_ms: now,
                        },
                    )?;
                    msg_success!(Message::SessionSaved(minutes));
                }
                Err(_) => msg_error!(Message::SessionSaveFailed),
            },
            Some(_) => msg_warning!(Message::NotEnoughElapsed),
            None => msg_warning!(Message::SelectSubjectToSave),
        }
    }

    state.reset();
    state.save(store)?;
    alarm::clear(store)?;
    msg_print!(Message::TimerReset);
    Ok(())
}

/// One line describing a receipt, for the status display.
fn describe(receipt: &Receipt) -> String {
    match receipt.kind {
        ReceiptKind::AutoSave | ReceiptKind::ManualSave => Message::SessionSaved(receipt.minutes.unwrap_or(0)).to_string(),
        ReceiptKind::Complete => match receipt.mode {
            Mode::Work => Message::WorkSessionComplete.to_string(),
            Mode::Break => Message::BreakOver.to_string(),
        },
        ReceiptKind::NoSubject => Message::SelectSubjectToSave.to_string(),
        ReceiptKind::TooShort => Message::NotEnoughElapsed.to_string(),
        ReceiptKind::CompleteError => Message::SessionSaveFailed.to_string(),
    }
}

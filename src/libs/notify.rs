//! Best-effort completion notifications.
//!
//! A chime and a console line when a cycle finishes. None of this is
//! correctness-critical: every failure is swallowed, and the completion
//! protocol never depends on a notification having been delivered.

use crate::libs::messages::Message;
use crate::libs::timer::Mode;
use crate::msg_print;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct Notifier {
    sound_enabled: bool,
}

impl Notifier {
    pub fn new(sound_enabled: bool) -> Self {
        Notifier { sound_enabled }
    }

    /// Announces a finished cycle. Failures writing the bell are ignored.
    pub fn completed(&self, mode: Mode) {
        match mode {
            Mode::Work => msg_print!(Message::WorkSessionComplete),
            Mode::Break => msg_print!(Message::BreakOver),
        }
        if self.sound_enabled {
            self.chime();
        }
    }

    /// Rings the terminal bell, best-effort.
    fn chime(&self) {
        let mut stdout = std::io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

//! Terminal table rendering for focus summaries.

use crate::api::questly::FocusSummary;
use crate::libs::session::Subject;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Prints the account's subjects, marking the current selection.
    pub fn subjects(subjects: &[Subject], selected: Option<i64>) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "SUBJECT", "SELECTED"]);
        for subject in subjects {
            let marker = if selected == Some(subject.id) { "*" } else { "" };
            table.add_row(row![subject.id, subject.name, marker]);
        }
        table.printstd();

        Ok(())
    }

    /// Prints today's sessions and the all-time totals per subject.
    pub fn summary(summary: &FocusSummary) -> Result<()> {
        let mut today = Table::new();
        today.add_row(row!["TODAY", "MINUTES"]);
        for entry in &summary.today_sessions {
            today.add_row(row![entry.name, entry.duration]);
        }
        today.add_row(row!["TOTAL", summary.today_total]);
        today.printstd();

        let mut all_time = Table::new();
        all_time.add_row(row!["ALL TIME", "MINUTES"]);
        for entry in &summary.total_focus {
            all_time.add_row(row![entry.subject_name, entry.total_focus]);
        }
        all_time.printstd();

        Ok(())
    }
}

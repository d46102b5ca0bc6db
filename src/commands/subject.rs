//! Subject listing and selection.
//!
//! Subjects are owned by the Questly account; this command fetches the live
//! list, reconciles the persisted selection against it (a deleted subject is
//! silently deselected), and updates the selection slot.

use crate::api::questly::Questly;
use crate::db::slots::Slots;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::Subject;
use crate::libs::subject;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_info, msg_success, msg_warning};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};

#[derive(Debug, Args)]
pub struct SubjectArgs {
    /// Select the subject with this id
    #[arg(short, long)]
    select: Option<i64>,
    /// Clear the current selection
    #[arg(short, long)]
    clear: bool,
}

pub async fn cmd(subject_args: SubjectArgs) -> Result<()> {
    let store = Slots::new()?;

    if subject_args.clear {
        subject::clear(&store)?;
        msg_success!(Message::SubjectCleared);
        return Ok(());
    }

    let config = Config::read()?;
    let questly_config = match config.questly {
        Some(questly_config) => questly_config,
        None => msg_bail_anyhow!(Message::QuestlyNotConfigured),
    };

    let subjects = Questly::new(&questly_config).subjects().await?;
    if subjects.is_empty() {
        msg_info!(Message::NoSubjects);
        return Ok(());
    }

    // A selection pointing at a subject the account no longer has is stale;
    // drop it rather than let completions save against a dead id.
    let mut selected = subject::selected(&store);
    if let Some(id) = selected {
        if !subjects.iter().any(|subject| subject.id == id) {
            subject::clear(&store)?;
            selected = None;
            msg_warning!(Message::SubjectSelectionStale);
        }
    }

    match subject_args.select {
        Some(id) => match subjects.iter().find(|subject| subject.id == id) {
            Some(subject) => {
                subject::select(&store, subject.id)?;
                msg_success!(Message::SubjectSelected(subject.name.clone()));
            }
            None => msg_warning!(Message::SubjectNotFound(id)),
        },
        None => {
            View::subjects(&subjects, selected)?;
            let chosen = prompt_subject(&subjects, selected)?;
            subject::select(&store, chosen.id)?;
            msg_success!(Message::SubjectSelected(chosen.name.clone()));
        }
    }

    Ok(())
}

fn prompt_subject<'a>(subjects: &'a [Subject], selected: Option<i64>) -> Result<&'a Subject> {
    let default = selected
        .and_then(|id| subjects.iter().position(|subject| subject.id == id))
        .unwrap_or(0);
    let names: Vec<&str> = subjects.iter().map(|subject| subject.name.as_str()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectSubject.to_string())
        .items(&names)
        .default(default)
        .interact()?;
    Ok(&subjects[index])
}

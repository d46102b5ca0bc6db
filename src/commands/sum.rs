//! Focus totals, fetched from the Questly account.

use crate::api::questly::Questly;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;

pub async fn cmd() -> Result<()> {
    let config = Config::read()?;
    let questly_config = match config.questly {
        Some(questly_config) => questly_config,
        None => msg_bail_anyhow!(Message::QuestlyNotConfigured),
    };

    let summary = Questly::new(&questly_config).summary().await?;

    msg_print!(Message::SummaryHeader, true);
    View::summary(&summary)?;

    Ok(())
}

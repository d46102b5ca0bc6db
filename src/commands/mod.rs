pub mod focus;
pub mod init;
pub mod subject;
pub mod sum;
pub mod watch;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Control the work/break timer")]
    Focus(focus::FocusArgs),
    #[command(about = "List or select the study subject")]
    Subject(subject::SubjectArgs),
    #[command(about = "Show today's and all-time focus totals")]
    Sum,
    #[command(about = "Watch the alarm slot and fire due completions")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Focus(args) => focus::cmd(args).await,
            Commands::Subject(args) => subject::cmd(args).await,
            Commands::Sum => sum::cmd().await,
            Commands::Watch => watch::cmd().await,
        }
    }
}

//! # Questly - Command-Line Focus Companion
//!
//! A command-line utility for running focused work/break cycles against a
//! Questly account, with a countdown that survives restarts and a background
//! watcher that records finished sessions exactly once.
//!
//! ## Features
//!
//! - **Drift-Free Countdown**: Remaining time is derived from wall-clock
//!   timestamps, never from accumulated ticks
//! - **Crash-Safe State**: The running timer is persisted after every
//!   transition and rehydrated by any later invocation
//! - **Completion Arbitration**: A time-bounded completion lock guarantees
//!   at most one session save per completed cycle, no matter how many
//!   processes observe the deadline
//! - **Background Watcher**: `questly watch` detects completions while no
//!   interactive command is running
//! - **Account Sync**: Finished work sessions are posted to the Questly API
//!   and summarized with `questly sum`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questly::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;

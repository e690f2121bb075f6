//! # Tomato - a pomodoro timer with a focus log
//!
//! Alternates focus and break intervals, records every finished interval
//! per user in SQLite and turns the log into sessions, statistics and
//! goal progress.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tomato::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;

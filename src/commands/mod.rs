pub mod goals;
pub mod history;
pub mod init;
pub mod login;
pub mod logout;
pub mod start;
pub mod stats;

use crate::libs::identity::{FileIdentity, Identity};
use crate::libs::messages::Message;
use crate::libs::record::UserId;
use crate::msg_error_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure timer lengths and sound")]
    Init(init::InitArgs),
    #[command(about = "Sign in as a user")]
    Login(login::LoginArgs),
    #[command(about = "Sign out the current user")]
    Logout,
    #[command(about = "Run the focus/break timer")]
    Start(start::StartArgs),
    #[command(about = "Show past sessions or the month calendar")]
    History(history::HistoryArgs),
    #[command(about = "Show focus and break statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Manage goals")]
    Goals(goals::GoalsArgs),
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
            Commands::Login(args) => login::cmd(args),
            Commands::Logout => logout::cmd(),
            Commands::Start(args) => start::cmd(args).await,
            Commands::History(args) => history::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Goals(args) => goals::cmd(args),
        }
    }
}

/// The signed-in user, or an error asking the user to sign in.
pub(crate) fn require_user() -> Result<UserId> {
    FileIdentity::new()?
        .current_user()
        .ok_or_else(|| msg_error_anyhow!(Message::LoginRequired))
}

use super::require_user;
use crate::db::db::Db;
use crate::db::goals::Goals;
use crate::db::records::Records;
use crate::libs::goal::{goal_progress, standing_progress, NewGoal, StandingGoals};
use crate::libs::messages::Message;
use crate::libs::record::{RecordKind, RecordQuery};
use crate::libs::store::{GoalStore, RecordStore};
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct GoalsArgs {
    #[command(subcommand)]
    command: Option<GoalsCommand>,
}

#[derive(Debug, Subcommand)]
enum GoalsCommand {
    /// Show goals with their progress (default)
    List,
    /// Track focus minutes logged under a task label
    Add {
        title: String,
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },
    /// Remove a goal
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Set the daily and weekly focus targets
    Set {
        #[arg(long, allow_negative_numbers = true)]
        daily: i64,
        #[arg(long, allow_negative_numbers = true)]
        weekly: i64,
    },
}

pub fn cmd(args: GoalsArgs) -> Result<()> {
    let user = require_user()?;
    let db = Db::new()?;
    let goals = Goals::from_db(&db);

    match args.command.unwrap_or(GoalsCommand::List) {
        GoalsCommand::List => {
            let records = Records::from_db(&db).query(&user, &RecordQuery::all().kind(RecordKind::Focus))?;
            let standing = goals.standing_goals(&user)?.unwrap_or_default();

            msg_print!(Message::StandingGoalsHeader, true);
            View::standing(&standing_progress(&standing, &records, &Local::now()))?;

            let named = goals.list_goals(&user)?;
            msg_print!(Message::GoalsHeader, true);
            if named.is_empty() {
                msg_info!(Message::NoGoalsFound);
                return Ok(());
            }
            let rows: Vec<_> = named
                .into_iter()
                .map(|goal| {
                    let progress = goal_progress(&goal, &records);
                    (goal, progress)
                })
                .collect();
            View::goals(&rows)?;
        }
        GoalsCommand::Add { title, minutes } => {
            let goal = NewGoal::new(user, &title, minutes)
                .map_err(|e| msg_error_anyhow!(Message::GoalRejected(e.to_string())))?;
            let goal = goals.create_goal(&goal)?;
            msg_success!(Message::GoalCreated(goal.title));
        }
        GoalsCommand::Delete { id, yes } => {
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteGoal(id).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::DeleteCancelled);
                return Ok(());
            }
            goals.delete_goal(&user, id)?;
            msg_success!(Message::GoalDeleted(id));
        }
        GoalsCommand::Set { daily, weekly } => {
            let standing = StandingGoals::new(daily, weekly)
                .map_err(|e| msg_error_anyhow!(Message::GoalRejected(e.to_string())))?;
            goals.save_standing_goals(&user, &standing)?;
            msg_success!(Message::StandingGoalsSaved(standing.daily_minutes, standing.weekly_minutes));
        }
    }

    Ok(())
}

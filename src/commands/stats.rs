use super::require_user;
use crate::db::db::Db;
use crate::db::goals::Goals;
use crate::db::records::Records;
use crate::libs::goal::standing_progress;
use crate::libs::messages::Message;
use crate::libs::record::{display_label, RecordQuery, TaskRecord};
use crate::libs::stats::{aggregate, unique_labels, StatsFilter, TimeWindow};
use crate::libs::store::{GoalStore, RecordStore};
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    All,
    Today,
    Week,
}

impl WindowArg {
    fn window(self) -> TimeWindow {
        match self {
            WindowArg::All => TimeWindow::All,
            WindowArg::Today => TimeWindow::Today,
            WindowArg::Week => TimeWindow::ThisWeek,
        }
    }

    fn title(self) -> &'static str {
        match self {
            WindowArg::All => "all time",
            WindowArg::Today => "today",
            WindowArg::Week => "last 7 days",
        }
    }
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Only count records with this task label
    #[arg(short, long)]
    task: Option<String>,
    #[arg(short, long, value_enum, default_value_t = WindowArg::All)]
    window: WindowArg,
}

/// Labels to suggest when `task` matches no record; `None` when it does.
fn task_suggestions(records: &[TaskRecord], task: &str) -> Option<Vec<String>> {
    if records.iter().any(|r| r.task == task) {
        return None;
    }
    Some(unique_labels(records).iter().map(|label| display_label(label).to_string()).collect())
}

pub fn cmd(args: StatsArgs) -> Result<()> {
    let user = require_user()?;
    let db = Db::new()?;
    let records = Records::from_db(&db).query(&user, &RecordQuery::all())?;
    let now = Local::now();

    let mut filter = StatsFilter::window(args.window.window());
    let title = match &args.task {
        Some(task) => format!("{}, task '{}'", args.window.title(), task),
        None => args.window.title().to_string(),
    };
    if let Some(task) = args.task.clone() {
        if let Some(labels) = task_suggestions(&records, &task) {
            msg_info!(Message::NoRecordsForTask(task));
            if !labels.is_empty() {
                msg_print!(Message::AvailableTasks(labels));
            }
            return Ok(());
        }
        filter = filter.with_task(task);
    }

    msg_print!(Message::StatsHeader(title), true);
    View::stats(&aggregate(&records, &filter, &now))?;

    if args.task.is_none() {
        let standing = Goals::from_db(&db).standing_goals(&user)?.unwrap_or_default();
        msg_print!(Message::StandingGoalsHeader, true);
        View::standing(&standing_progress(&standing, &records, &now))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::record::{RecordKind, UserId};
    use chrono::Utc;

    fn rec(task: &str, kind: RecordKind) -> TaskRecord {
        TaskRecord {
            id: 1,
            user_id: UserId::new("u1"),
            task: task.to_string(),
            duration: 25,
            kind,
            completed: true,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn unknown_task_lists_the_recorded_labels() {
        let records = vec![
            rec("write", RecordKind::Focus),
            rec("", RecordKind::Focus),
            rec("write", RecordKind::Break),
            rec("read", RecordKind::Break),
        ];

        assert_eq!(task_suggestions(&records, "write"), None);
        assert_eq!(
            task_suggestions(&records, "code"),
            Some(vec!["write".to_string(), "unnamed".to_string(), "read".to_string()])
        );
        assert_eq!(task_suggestions(&[], "code"), Some(Vec::new()));
    }
}

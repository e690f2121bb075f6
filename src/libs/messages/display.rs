//! Text for every user-facing [`Message`].
//!
//! All wording lives in this one match so commands never build their own
//! strings for the terminal.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIG MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed, defaults will be used".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleTimer => "Timer settings".to_string(),
            Message::PromptFocusMinutes => "Focus length (minutes)".to_string(),
            Message::PromptBreakMinutes => "Break length (minutes)".to_string(),
            Message::PromptSound => "Ring the terminal bell when an interval ends?".to_string(),
            Message::PromptRecentLimit => "Number of recent tasks to suggest".to_string(),
            Message::ValueOutOfRange(min, max) => format!("Enter a value between {} and {}", min, max),

            // === SESSION MESSAGES ===
            Message::LoggedIn(user) => format!("Signed in as {}", user),
            Message::AlreadyLoggedIn(user) => format!("Already signed in as {}", user),
            Message::LoggedOut(user) => format!("Signed out {}", user),
            Message::NotLoggedIn => "Nobody is signed in".to_string(),
            Message::LoginRequired => "Sign in first with `tomato login <user>`".to_string(),
            Message::EmptyUserId => "User id must not be empty".to_string(),
            Message::RecordsNotSaved => "Not signed in: completed intervals will not be saved".to_string(),

            // === TIMER MESSAGES ===
            Message::TimerStarted(phase, clock) => format!("{} started, {} left", phase, clock),
            Message::TimerResumed => "Timer resumed".to_string(),
            Message::TimerAlreadyRunning => "Timer is already running".to_string(),
            Message::TimerPaused(clock) => format!("Timer paused at {}", clock),
            Message::TimerNotRunning => "Timer is not running".to_string(),
            Message::TimerStopped(phase) => format!("Timer stopped, {} reset", phase),
            Message::TimerStatus(status) => status.clone(),
            Message::TimerHelp => {
                "Commands: p pause, r resume, s stop, t <label> set task, f <min> focus length, b <min> break length, q quit"
                    .to_string()
            }
            Message::TimerQuit => "Timer closed".to_string(),
            Message::TaskLabelSet(label) => format!("Task set to '{}'", label),
            Message::TaskLabelCleared => "Task cleared, intervals will not be recorded".to_string(),
            Message::FocusLengthSet(minutes) => format!("Focus length set to {} min", minutes),
            Message::BreakLengthSet(minutes) => format!("Break length set to {} min", minutes),
            Message::FocusCompleted(label) => format!("Focus on '{}' complete, time for a break", label),
            Message::BreakCompleted => "Break over".to_string(),
            Message::CycleClosed => "Cycle complete. Set a task and press r to go again".to_string(),
            Message::RecentTasks(labels) => format!("Recent tasks: {}", labels.join(", ")),
            Message::TodaySummary(focus, rest, percent) => {
                format!("Today: {} min focus, {} min break, daily goal {}%", focus, rest, percent)
            }
            Message::UnknownTimerCommand(input) => format!("Unknown command '{}'", input),
            Message::InvalidMinutes(input) => format!("'{}' is not a number of minutes", input),

            // === HISTORY MESSAGES ===
            Message::HistoryHeader => "Session history".to_string(),
            Message::NoSessionsFound => "No sessions found".to_string(),
            Message::PageInfo(page, total) => format!("Page {} of {}", page, total),
            Message::CalendarHeader(month) => format!("Days with records in {}", month),
            Message::InvalidDate(input) => format!("Invalid date '{}', expected YYYY-MM-DD or 'today'", input),
            Message::InvalidMonth(input) => format!("Invalid month '{}', expected YYYY-MM", input),

            // === STATS MESSAGES ===
            Message::StatsHeader(window) => format!("Statistics ({})", window),
            Message::NoRecordsForTask(task) => format!("No records for task '{}'", task),
            Message::AvailableTasks(labels) => format!("Available tasks: {}", labels.join(", ")),

            // === GOAL MESSAGES ===
            Message::GoalsHeader => "Goals".to_string(),
            Message::NoGoalsFound => "No goals yet".to_string(),
            Message::GoalCreated(title) => format!("Goal '{}' created", title),
            Message::GoalDeleted(id) => format!("Goal {} deleted", id),
            Message::ConfirmDeleteGoal(id) => format!("Delete goal {}?", id),
            Message::DeleteCancelled => "Nothing deleted".to_string(),
            Message::StandingGoalsHeader => "Daily and weekly goals".to_string(),
            Message::StandingGoalsSaved(daily, weekly) => {
                format!("Standing goals saved: {} min per day, {} min per week", daily, weekly)
            }
            Message::GoalRejected(reason) => format!("Goal rejected: {}", reason),

            // === STORAGE MESSAGES ===
            Message::StoreFailed(error) => format!("Storage error: {}", error),
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "Database schema is up to date".to_string(),
        };
        write!(f, "{}", text)
    }
}

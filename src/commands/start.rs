//! Interactive timer.
//!
//! Runs one tokio task that waits on the ticker, stdin and Ctrl-C at once.
//! Typed commands are one letter, optionally followed by an argument:
//!
//! ```text
//! p            pause            t <label>   set task label
//! r            resume           f <min>     focus length
//! s            stop and rewind  b <min>     break length
//! (empty)      show status      q           quit
//! ```

use crate::db::db::Db;
use crate::db::goals::Goals;
use crate::db::records::Records;
use crate::libs::config::{Config, TimerConfig};
use crate::libs::context::{Dashboard, SessionContext};
use crate::libs::cue;
use crate::libs::feed::LiveRecords;
use crate::libs::goal;
use crate::libs::history::recent_labels;
use crate::libs::identity::FileIdentity;
use crate::libs::messages::Message;
use crate::libs::pomodoro::Pomodoro;
use crate::libs::record::{display_label, UserId};
use crate::libs::store::{GoalStore, RecordStore};
use crate::libs::timer::{Completion, Phase, TimerSettings, TimerSnapshot};
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Task label to record the intervals under
    #[arg(short, long)]
    task: Option<String>,
    /// Focus length in minutes (1-60)
    #[arg(short, long)]
    focus: Option<u32>,
    /// Break length in minutes (1-30)
    #[arg(short = 'b', long = "break")]
    break_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    Pause,
    Resume,
    Stop,
    Task(String),
    Focus(u32),
    Break(u32),
    Status,
    Help,
    Quit,
}

/// Parse one line of input; unknown input maps to the message to show.
pub fn parse_command(line: &str) -> Result<TimerCommand, Message> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let minutes = |value: &str| value.parse::<u32>().map_err(|_| Message::InvalidMinutes(value.to_string()));

    match head {
        "" => Ok(TimerCommand::Status),
        "p" => Ok(TimerCommand::Pause),
        "r" => Ok(TimerCommand::Resume),
        "s" => Ok(TimerCommand::Stop),
        "t" => Ok(TimerCommand::Task(rest.to_string())),
        "f" => minutes(rest).map(TimerCommand::Focus),
        "b" => minutes(rest).map(TimerCommand::Break),
        "h" | "?" => Ok(TimerCommand::Help),
        "q" => Ok(TimerCommand::Quit),
        _ => Err(Message::UnknownTimerCommand(line.to_string())),
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Focus => "Focus",
        Phase::Break => "Break",
    }
}

fn status_line(snapshot: &TimerSnapshot) -> String {
    let state = if snapshot.running { "running" } else { "paused" };
    format!(
        "{} {} [{}] {} ({:.0}% left)",
        phase_name(snapshot.phase),
        snapshot.clock(),
        display_label(&snapshot.task_label),
        state,
        snapshot.progress
    )
}

/// Command-line lengths override the configured ones.
fn timer_settings(args: &StartArgs, config: &TimerConfig) -> TimerSettings {
    TimerConfig {
        focus_minutes: args.focus.unwrap_or(config.focus_minutes),
        break_minutes: args.break_minutes.unwrap_or(config.break_minutes),
        ..config.clone()
    }
    .settings()
}

pub async fn cmd(args: StartArgs) -> Result<()> {
    let timer_config = Config::read()?.timer();
    let settings = timer_settings(&args, &timer_config);

    let db = Db::new()?;
    let live = Arc::new(LiveRecords::new(Records::from_db(&db)));
    let goals = Goals::from_db(&db);

    let dashboard = Arc::new(Mutex::new(Dashboard::new(live.clone())));
    let mut context = SessionContext::new();
    context.add_listener(dashboard.clone());
    context.restore(&FileIdentity::new()?);
    let user = context.current_user().cloned();

    match &user {
        Some(_) => {
            let records = dashboard.lock().view().records;
            let recent: Vec<String> = recent_labels(&records).into_iter().take(timer_config.recent_limit).collect();
            if !recent.is_empty() {
                msg_print!(Message::RecentTasks(recent));
            }
        }
        None => msg_warning!(Message::RecordsNotSaved),
    }

    let mut pomodoro = Pomodoro::new(settings, live, cue::from_setting(timer_config.sound));
    if let Some(task) = args.task {
        pomodoro.set_task_label(task.trim());
    }
    pomodoro.start();
    msg_info!(Message::TimerStarted(
        phase_name(pomodoro.engine().phase()).to_string(),
        pomodoro.snapshot().clock()
    ));
    msg_print!(Message::TimerHelp);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = pomodoro.next_tick() => {
                if let Some(completion) = pomodoro.on_tick(Utc::now(), user.as_ref()) {
                    report_completion(&completion, &dashboard, &goals, user.as_ref());
                } else if pomodoro.engine().remaining_seconds() % 60 == 0 {
                    msg_print!(Message::TimerStatus(status_line(&pomodoro.snapshot())));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(TimerCommand::Quit) => break,
                    Ok(command) => apply(&mut pomodoro, command),
                    Err(message) => msg_error!(message),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    pomodoro.stop();
    msg_info!(Message::TimerQuit);
    Ok(())
}

fn apply<S: RecordStore>(pomodoro: &mut Pomodoro<S>, command: TimerCommand) {
    match command {
        TimerCommand::Pause => {
            if pomodoro.pause() {
                msg_info!(Message::TimerPaused(pomodoro.snapshot().clock()));
            } else {
                msg_info!(Message::TimerNotRunning);
            }
        }
        TimerCommand::Resume => {
            if pomodoro.start() {
                msg_info!(Message::TimerResumed);
            } else {
                msg_info!(Message::TimerAlreadyRunning);
            }
        }
        TimerCommand::Stop => {
            pomodoro.stop();
            msg_info!(Message::TimerStopped(phase_name(pomodoro.engine().phase()).to_string()));
        }
        TimerCommand::Task(label) if label.is_empty() => {
            pomodoro.set_task_label(label);
            msg_info!(Message::TaskLabelCleared);
        }
        TimerCommand::Task(label) => {
            msg_info!(Message::TaskLabelSet(label.clone()));
            pomodoro.set_task_label(label);
        }
        TimerCommand::Focus(minutes) => {
            msg_info!(Message::FocusLengthSet(pomodoro.set_focus_minutes(minutes)));
        }
        TimerCommand::Break(minutes) => {
            msg_info!(Message::BreakLengthSet(pomodoro.set_break_minutes(minutes)));
        }
        TimerCommand::Status => msg_print!(Message::TimerStatus(status_line(&pomodoro.snapshot()))),
        TimerCommand::Help => msg_print!(Message::TimerHelp),
        TimerCommand::Quit => {}
    }
}

fn report_completion(completion: &Completion, dashboard: &Mutex<Dashboard>, goals: &Goals, user: Option<&UserId>) {
    match completion.finished {
        Phase::Focus => {
            let label = completion.record.as_ref().map_or("", |r| r.task.as_str());
            msg_success!(Message::FocusCompleted(display_label(label).to_string()));
        }
        Phase::Break => msg_success!(Message::BreakCompleted),
    }

    if let Some(user) = user {
        let standing = goals.standing_goals(user).unwrap_or_else(|err| {
            msg_warning!(Message::StoreFailed(err.to_string()));
            None
        });
        let standing = standing.unwrap_or_default();
        let view = dashboard.lock().view();
        let progress = goal::standing_progress(&standing, &view.records, &Local::now());
        msg_print!(Message::TodaySummary(
            view.overview.today.total_focus_minutes,
            view.overview.today.total_break_minutes,
            progress.daily.rounded_percent()
        ));
    }

    if completion.cycle_closed {
        msg_info!(Message::CycleClosed);
    }
}

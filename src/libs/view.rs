use super::formatter::{format_minutes, progress_bar, FormattedSession};
use super::goal::{Goal, Progress, StandingProgress};
use super::session::Session;
use super::stats::Stats;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use prettytable::{row, Table};
use std::collections::BTreeSet;

const BAR_WIDTH: usize = 20;

pub struct View {}

impl View {
    pub fn sessions(day: &NaiveDate, sessions: &[Session]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row![format!("{}", day.format("%Y-%m-%d %a"))]);
        table.add_row(row!["ID", "TASK", "START", "END", "FOCUS", "BREAK", "TOTAL"]);
        for session in sessions {
            let row = FormattedSession::local(session);
            table.add_row(row![row.id, row.task, row.start, row.end, row.focus, row.rest, row.total]);
        }
        table.printstd();

        Ok(())
    }

    pub fn stats(stats: &Stats) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["FOCUS", "BREAK", "TASKS", "COMPLETED", "AVG / DAY"]);
        table.add_row(row![
            format_minutes(stats.total_focus_minutes),
            format_minutes(stats.total_break_minutes),
            stats.total_task_count,
            stats.completed_count,
            format_minutes(stats.average_minutes_per_day.round() as u64)
        ]);
        table.printstd();

        Ok(())
    }

    pub fn goals(goals: &[(Goal, Progress)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DONE", "TARGET", "PROGRESS", ""]);
        for (goal, progress) in goals {
            table.add_row(row![
                goal.id,
                goal.title,
                format_minutes(progress.done_minutes),
                format_minutes(u64::from(progress.target_minutes)),
                progress_bar(progress.percent, BAR_WIDTH),
                format!("{}%", progress.rounded_percent())
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn standing(progress: &StandingProgress) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["GOAL", "DONE", "TARGET", "PROGRESS", ""]);
        for (name, p) in [("Daily", &progress.daily), ("Weekly", &progress.weekly)] {
            table.add_row(row![
                name,
                format_minutes(p.done_minutes),
                format_minutes(u64::from(p.target_minutes)),
                progress_bar(p.percent, BAR_WIDTH),
                format!("{}%", p.rounded_percent())
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Month grid starting on Monday; days with records are starred.
    pub fn calendar(first_day: NaiveDate, marked: &BTreeSet<u32>) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);

        for week in calendar_weeks(first_day, marked) {
            let mut row = prettytable::Row::empty();
            for cell in week {
                row.add_cell(prettytable::Cell::new(&cell));
            }
            table.add_row(row);
        }
        table.printstd();

        Ok(())
    }
}

/// Cell text for each week row of the month containing `first_day`.
fn calendar_weeks(first_day: NaiveDate, marked: &BTreeSet<u32>) -> Vec<Vec<String>> {
    let offset = first_day.weekday().num_days_from_monday() as usize;
    let mut cells: Vec<String> = vec![String::new(); offset];

    let mut day = first_day;
    while day.month() == first_day.month() {
        let mark = if marked.contains(&day.day()) { "*" } else { "" };
        cells.push(format!("{}{}", day.day(), mark));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

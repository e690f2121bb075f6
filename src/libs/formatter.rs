//! Display formatting for durations and session rows.
//!
//! Minute counts are shown as `HH:MM`.

use super::session::Session;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

/// One session, pre-formatted for a table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedSession {
    pub id: i64,
    pub task: String,
    pub start: String,
    pub end: String,
    pub focus: String,
    pub rest: String,
    pub total: String,
}

impl FormattedSession {
    pub fn new<Tz: TimeZone>(session: &Session, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: session.focus.id,
            task: session.label().to_string(),
            start: format_time(&session.started_at(), tz),
            end: format_time(&session.ended_at(), tz),
            focus: format_minutes(u64::from(session.focus_minutes())),
            rest: format_minutes(u64::from(session.break_minutes())),
            total: format_minutes(u64::from(session.total_duration())),
        }
    }

    pub fn local(session: &Session) -> Self {
        Self::new(session, &Local)
    }
}

pub fn format_minutes(minutes: u64) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Local wall-clock `HH:MM` of an instant.
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%H:%M").to_string()
}

/// Text progress bar, `width` cells wide.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::record::{RecordKind, TaskRecord, UserId};

    #[test]
    fn minutes_render_as_hours_and_minutes() {
        assert_eq!(format_minutes(125), "02:05");
        assert_eq!(format_minutes(0), "00:00");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(50.0, 10), "[#####-----]");
        assert_eq!(progress_bar(150.0, 4), "[####]");
        assert_eq!(progress_bar(0.0, 4), "[----]");
    }

    #[test]
    fn session_row_uses_start_and_end_instants() {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 25, 0).unwrap();
        let session = Session {
            focus: TaskRecord {
                id: 7,
                user_id: UserId::new("u1"),
                task: String::new(),
                duration: 25,
                kind: RecordKind::Focus,
                completed: true,
                timestamp: at,
            },
            paired_break: None,
        };

        let row = FormattedSession::new(&session, &Utc);
        assert_eq!(row.task, "unnamed");
        assert_eq!(row.start, "09:00");
        assert_eq!(row.end, "09:25");
        assert_eq!(row.total, "00:25");
    }
}

//! Pairing focus records with the break that followed them.
//!
//! A session is one focus interval plus, optionally, the break taken right
//! after it. Records carry their *completion* instant, so a break belongs to a
//! focus interval when the break started close to where the focus interval
//! ended:
//!
//! ```text
//!   focus ─────────────┤ focus.timestamp
//!                      │<- gap ->│
//!                                ├──── break ────┤ break.timestamp
//!                                 break.started_at()
//!
//!   paired  <=>  same label  &&  |gap| < 300 000 ms
//! ```
//!
//! When several breaks qualify, the one with the smallest gap wins; equal gaps
//! keep the earliest in input order. Breaks that match no focus record are not
//! part of any session.

use super::record::TaskRecord;
use chrono::{DateTime, Utc};

/// Maximum distance between a focus end and a break start, in milliseconds.
pub const PAIRING_WINDOW_MS: i64 = 300_000;

/// A focus record with the break paired to it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub focus: TaskRecord,
    pub paired_break: Option<TaskRecord>,
}

impl Session {
    pub fn label(&self) -> &str {
        self.focus.display_label()
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus.duration
    }

    pub fn break_minutes(&self) -> u32 {
        self.paired_break.as_ref().map_or(0, |b| b.duration)
    }

    pub fn total_duration(&self) -> u32 {
        self.focus_minutes() + self.break_minutes()
    }

    pub fn completed(&self) -> bool {
        self.focus.completed
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.focus.started_at()
    }

    /// When the last interval of the session completed.
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.paired_break.as_ref().map_or(self.focus.timestamp, |b| b.timestamp)
    }
}

/// Distance in milliseconds between the end of `focus` and the start of `brk`.
fn gap_ms(focus: &TaskRecord, brk: &TaskRecord) -> i64 {
    (brk.started_at() - focus.timestamp).num_milliseconds().abs()
}

fn find_break<'a>(focus: &TaskRecord, records: &'a [TaskRecord]) -> Option<&'a TaskRecord> {
    records
        .iter()
        .filter(|r| r.is_break() && r.task == focus.task)
        .map(|r| (gap_ms(focus, r), r))
        .filter(|(gap, _)| *gap < PAIRING_WINDOW_MS)
        // min_by_key returns the first of equal minima
        .min_by_key(|(gap, _)| *gap)
        .map(|(_, r)| r)
}

/// Build sessions from a record set, newest focus first.
pub fn pair(records: &[TaskRecord]) -> Vec<Session> {
    let mut sessions: Vec<Session> = records
        .iter()
        .filter(|r| r.is_focus())
        .map(|focus| Session {
            focus: focus.clone(),
            paired_break: find_break(focus, records).cloned(),
        })
        .collect();

    sessions.sort_by(|a, b| b.focus.timestamp.cmp(&a.focus.timestamp));
    sessions
}

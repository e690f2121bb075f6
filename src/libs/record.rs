//! Task records: the append-only log of completed timer intervals.
//!
//! Every completed focus or break interval becomes one `TaskRecord`. Records
//! are never edited or deleted; sessions, statistics and goal progress are all
//! derived from the record set on demand.
//!
//! The serialized field names (`userId`, `type`, ...) are the persisted layout
//! and must not change.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label shown for records whose task text is blank.
pub const UNNAMED_TASK: &str = "unnamed";

/// Store-assigned record identifier.
pub type RecordId = i64;

/// Opaque identifier of the user owning a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which kind of interval a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Focus,
    Break,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Focus => "focus",
            RecordKind::Break => "break",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "focus" => Ok(RecordKind::Focus),
            "break" => Ok(RecordKind::Break),
            other => Err(format!("unknown record kind '{other}'")),
        }
    }
}

/// A persisted, completed interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: RecordId,
    pub user_id: UserId,
    /// Free-text label; may be empty.
    pub task: String,
    /// Interval length in minutes, always positive.
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// True only when the interval ran down to zero.
    pub completed: bool,
    /// Wall-clock instant at which the interval completed.
    pub timestamp: DateTime<Utc>,
}

impl TaskRecord {
    pub fn is_focus(&self) -> bool {
        self.kind == RecordKind::Focus
    }

    pub fn is_break(&self) -> bool {
        self.kind == RecordKind::Break
    }

    /// The label to show, substituting `unnamed` for blank text.
    pub fn display_label(&self) -> &str {
        display_label(&self.task)
    }

    /// Instant the interval began, derived from its completion and length.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.timestamp - Duration::minutes(i64::from(self.duration))
    }
}

pub fn display_label(task: &str) -> &str {
    if task.trim().is_empty() {
        UNNAMED_TASK
    } else {
        task
    }
}

/// A record about to be appended; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRecord {
    pub user_id: UserId,
    pub task: String,
    pub duration: u32,
    pub kind: RecordKind,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

impl NewTaskRecord {
    pub fn with_id(self, id: RecordId) -> TaskRecord {
        TaskRecord {
            id,
            user_id: self.user_id,
            task: self.task,
            duration: self.duration,
            kind: self.kind,
            completed: self.completed,
            timestamp: self.timestamp,
        }
    }
}

/// Optional filters for a per-user record query.
///
/// Results are always ordered by `timestamp`, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub kind: Option<RecordKind>,
    pub task: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl RecordQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes the kind/task/since filters (limit excluded).
    pub fn matches(&self, record: &TaskRecord) -> bool {
        self.kind.map_or(true, |kind| record.kind == kind)
            && self.task.as_deref().map_or(true, |task| record.task == task)
            && self.since.map_or(true, |since| record.timestamp >= since)
    }
}

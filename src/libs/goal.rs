//! Goal tracking against the live record set.
//!
//! Two kinds of goals exist:
//!
//! - **Named goals**: a target number of focus minutes for one task label,
//!   measured across all time.
//! - **Standing goals**: one daily and one weekly focus target per user,
//!   compared against today's and this week's totals.
//!
//! Progress is always computed from the records passed in; nothing here keeps
//! a running tally, so progress cannot drift from the record set.

use super::error::ValidationError;
use super::record::{TaskRecord, UserId};
use super::stats::{self, TimeWindow};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Standing daily target used until the user saves one.
pub const DEFAULT_DAILY_MINUTES: u32 = 120;
/// Standing weekly target used until the user saves one.
pub const DEFAULT_WEEKLY_MINUTES: u32 = 600;

/// A persisted named goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub user_id: UserId,
    /// Task label whose focus minutes count towards the goal.
    pub title: String,
    pub target_minutes: u32,
    pub created_at: DateTime<Utc>,
}

/// A validated named goal that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    pub user_id: UserId,
    pub title: String,
    pub target_minutes: u32,
}

impl NewGoal {
    pub fn new(user_id: UserId, title: &str, target_minutes: i64) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyLabel);
        }

        Ok(Self {
            user_id,
            title: title.to_string(),
            target_minutes: validate_target(target_minutes)?,
        })
    }
}

/// The per-user daily and weekly focus targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingGoals {
    pub daily_minutes: u32,
    pub weekly_minutes: u32,
}

impl Default for StandingGoals {
    fn default() -> Self {
        Self {
            daily_minutes: DEFAULT_DAILY_MINUTES,
            weekly_minutes: DEFAULT_WEEKLY_MINUTES,
        }
    }
}

impl StandingGoals {
    pub fn new(daily_minutes: i64, weekly_minutes: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            daily_minutes: validate_target(daily_minutes)?,
            weekly_minutes: validate_target(weekly_minutes)?,
        })
    }
}

fn validate_target(minutes: i64) -> Result<u32, ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::NonPositiveTarget(minutes));
    }
    u32::try_from(minutes).map_err(|_| ValidationError::NonPositiveTarget(minutes))
}

/// Progress of some amount of focus time towards a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub done_minutes: u64,
    pub target_minutes: u32,
    /// Percentage in `0.0..=100.0`.
    pub percent: f64,
    pub completed: bool,
}

impl Progress {
    pub fn new(done_minutes: u64, target_minutes: u32) -> Self {
        let percent = if target_minutes == 0 {
            100.0
        } else {
            (done_minutes as f64 * 100.0 / f64::from(target_minutes)).min(100.0)
        };

        Self {
            done_minutes,
            target_minutes,
            percent,
            completed: done_minutes >= u64::from(target_minutes),
        }
    }

    /// Whole-number percentage for display.
    pub fn rounded_percent(&self) -> u32 {
        self.percent.round() as u32
    }
}

/// All-time focus minutes logged under the goal's title, against its target.
pub fn goal_progress(goal: &Goal, records: &[TaskRecord]) -> Progress {
    let done = records
        .iter()
        .filter(|r| r.is_focus() && r.task == goal.title)
        .map(|r| u64::from(r.duration))
        .sum();

    Progress::new(done, goal.target_minutes)
}

/// Progress of today's and this week's focus time against standing goals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandingProgress {
    pub daily: Progress,
    pub weekly: Progress,
}

pub fn standing_progress<Tz: TimeZone>(
    goals: &StandingGoals,
    records: &[TaskRecord],
    now: &DateTime<Tz>,
) -> StandingProgress {
    let today = stats::focus_minutes(records, TimeWindow::Today, now);
    let week = stats::focus_minutes(records, TimeWindow::ThisWeek, now);

    StandingProgress {
        daily: Progress::new(today, goals.daily_minutes),
        weekly: Progress::new(week, goals.weekly_minutes),
    }
}

//! Statistics over a user's record set.
//!
//! All figures are recomputed from scratch over whatever records are passed
//! in. The caller supplies `now` (with its time zone) so that "today" means the
//! caller's calendar day and results are reproducible in tests.
//!
//! ## Figures
//!
//! ```text
//! total focus / break  = sum of durations per kind
//! task count           = distinct labels among focus records
//! completed count      = focus records with completed == true
//! average per day      = (focus + break) / max(1, ceil((now - oldest) / 1 day))
//! ```

use super::record::TaskRecord;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashSet;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Time range a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    All,
    /// Same calendar day as `now`, in `now`'s time zone.
    Today,
    /// The last seven 24-hour periods up to `now`.
    ThisWeek,
    Since(DateTime<Utc>),
}

impl TimeWindow {
    pub fn contains<Tz: TimeZone>(&self, timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Today => timestamp.with_timezone(&now.timezone()).date_naive() == now.date_naive(),
            TimeWindow::ThisWeek => *timestamp >= now.with_timezone(&Utc) - Duration::days(7),
            TimeWindow::Since(since) => timestamp >= since,
        }
    }
}

/// Which records a `Stats` is computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFilter {
    pub window: TimeWindow,
    pub task: Option<String>,
}

impl Default for StatsFilter {
    fn default() -> Self {
        Self {
            window: TimeWindow::All,
            task: None,
        }
    }
}

impl StatsFilter {
    pub fn window(window: TimeWindow) -> Self {
        Self { window, task: None }
    }

    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    fn accepts<Tz: TimeZone>(&self, record: &TaskRecord, now: &DateTime<Tz>) -> bool {
        self.window.contains(&record.timestamp, now) && self.task.as_deref().map_or(true, |task| record.task == task)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub total_focus_minutes: u64,
    pub total_break_minutes: u64,
    pub total_task_count: usize,
    pub completed_count: usize,
    pub average_minutes_per_day: f64,
}

impl Stats {
    pub fn total_minutes(&self) -> u64 {
        self.total_focus_minutes + self.total_break_minutes
    }
}

pub fn aggregate<Tz: TimeZone>(records: &[TaskRecord], filter: &StatsFilter, now: &DateTime<Tz>) -> Stats {
    let filtered: Vec<&TaskRecord> = records.iter().filter(|r| filter.accepts(r, now)).collect();

    let Some(oldest) = filtered.iter().map(|r| r.timestamp).min() else {
        return Stats::default();
    };

    let mut stats = Stats::default();
    let mut labels = HashSet::new();
    for record in &filtered {
        if record.is_focus() {
            stats.total_focus_minutes += u64::from(record.duration);
            labels.insert(record.task.as_str());
            if record.completed {
                stats.completed_count += 1;
            }
        } else {
            stats.total_break_minutes += u64::from(record.duration);
        }
    }
    stats.total_task_count = labels.len();

    let elapsed_ms = (now.with_timezone(&Utc) - oldest).num_milliseconds() as f64;
    let days = (elapsed_ms / MILLIS_PER_DAY).ceil().max(1.0);
    stats.average_minutes_per_day = stats.total_minutes() as f64 / days;

    stats
}

/// Focus minutes inside a window, across all labels.
pub fn focus_minutes<Tz: TimeZone>(records: &[TaskRecord], window: TimeWindow, now: &DateTime<Tz>) -> u64 {
    records
        .iter()
        .filter(|r| r.is_focus() && window.contains(&r.timestamp, now))
        .map(|r| u64::from(r.duration))
        .sum()
}

/// Dashboard summary: today, the last seven days, and the week's daily focus average.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overview {
    pub today: Stats,
    pub week: Stats,
    pub week_daily_focus_average: f64,
}

pub fn overview<Tz: TimeZone>(records: &[TaskRecord], now: &DateTime<Tz>) -> Overview {
    let today = aggregate(records, &StatsFilter::window(TimeWindow::Today), now);
    let week = aggregate(records, &StatsFilter::window(TimeWindow::ThisWeek), now);

    Overview {
        today,
        week,
        week_daily_focus_average: week.total_focus_minutes as f64 / 7.0,
    }
}

/// Distinct labels present in the record set, in first-seen order.
pub fn unique_labels(records: &[TaskRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.task.as_str()))
        .map(|r| r.task.clone())
        .collect()
}

//! The focus/break timer state machine.
//!
//! The engine is pure state: it does not sleep, spawn, or persist. A driver
//! calls [`TimerEngine::tick`] once per elapsed second while the timer is
//! running, and acts on the [`Completion`] it gets back when an interval runs
//! out.
//!
//! ## Cycle
//!
//! ```text
//!            start                 0s left                   0s left
//!   Focus ─────────▶ Focus(run) ──────────▶ Break(run) ──────────▶ Focus(idle)
//!   (idle)  ◀───────  │   pause/stop          auto-continues          label cleared
//! ```
//!
//! A completed interval produces a record only when a user is signed in and a
//! task label is set. The phase advances either way.

use super::record::{NewTaskRecord, RecordKind, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const FOCUS_MINUTES_RANGE: RangeInclusive<u32> = 1..=60;
pub const BREAK_MINUTES_RANGE: RangeInclusive<u32> = 1..=30;
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_BREAK_MINUTES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Focus,
    Break,
}

impl Phase {
    pub fn kind(&self) -> RecordKind {
        match self {
            Phase::Focus => RecordKind::Focus,
            Phase::Break => RecordKind::Break,
        }
    }
}

/// Configured interval lengths in minutes, always within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    focus_minutes: u32,
    break_minutes: u32,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
        }
    }
}

impl TimerSettings {
    /// Out-of-range values are clamped into range.
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Self {
        Self {
            focus_minutes: clamp_to(focus_minutes, &FOCUS_MINUTES_RANGE),
            break_minutes: clamp_to(break_minutes, &BREAK_MINUTES_RANGE),
        }
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn minutes_for(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Focus => self.focus_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    pub fn seconds_for(&self, phase: Phase) -> u32 {
        self.minutes_for(phase) * 60
    }
}

fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

/// What happened when an interval ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The phase that just finished.
    pub finished: Phase,
    /// The record to persist, if a user and a task label were present.
    pub record: Option<NewTaskRecord>,
    /// True when a break finished and the focus/break cycle closed.
    pub cycle_closed: bool,
}

/// Read-only view of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    pub task_label: String,
    /// Share of the current interval still left, `0.0..=100.0`.
    pub progress: f64,
}

impl TimerSnapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    remaining_seconds: u32,
    running: bool,
    settings: TimerSettings,
    task_label: String,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

impl TimerEngine {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            phase: Phase::Focus,
            remaining_seconds: settings.seconds_for(Phase::Focus),
            running: false,
            settings,
            task_label: String::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn task_label(&self) -> &str {
        &self.task_label
    }

    /// Resume counting down. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting down, keeping the remaining time. Returns false if idle.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop and rewind the current phase to its full length.
    pub fn stop(&mut self) {
        self.running = false;
        self.remaining_seconds = self.settings.seconds_for(self.phase);
    }

    pub fn set_task_label(&mut self, label: impl Into<String>) {
        self.task_label = label.into();
    }

    /// Change the focus length; retargets the countdown if focus is active.
    pub fn set_focus_minutes(&mut self, minutes: u32) -> u32 {
        self.settings = TimerSettings::new(minutes, self.settings.break_minutes);
        if self.phase == Phase::Focus {
            self.remaining_seconds = self.settings.seconds_for(Phase::Focus);
        }
        self.settings.focus_minutes
    }

    /// Change the break length; retargets the countdown if break is active.
    pub fn set_break_minutes(&mut self, minutes: u32) -> u32 {
        self.settings = TimerSettings::new(self.settings.focus_minutes, minutes);
        if self.phase == Phase::Break {
            self.remaining_seconds = self.settings.seconds_for(Phase::Break);
        }
        self.settings.break_minutes
    }

    /// Advance by one second. Returns a completion when the interval runs out.
    pub fn tick(&mut self, now: DateTime<Utc>, user: Option<&UserId>) -> Option<Completion> {
        if !self.running {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        Some(self.complete(now, user))
    }

    fn complete(&mut self, now: DateTime<Utc>, user: Option<&UserId>) -> Completion {
        let finished = self.phase;
        let record = match user {
            Some(user_id) if !self.task_label.is_empty() => Some(NewTaskRecord {
                user_id: user_id.clone(),
                task: self.task_label.clone(),
                duration: self.settings.minutes_for(finished),
                kind: finished.kind(),
                completed: true,
                timestamp: now,
            }),
            _ => None,
        };

        let cycle_closed = match finished {
            Phase::Focus => {
                self.phase = Phase::Break;
                self.remaining_seconds = self.settings.seconds_for(Phase::Break);
                false
            }
            Phase::Break => {
                self.phase = Phase::Focus;
                self.remaining_seconds = self.settings.seconds_for(Phase::Focus);
                self.running = false;
                self.task_label.clear();
                true
            }
        };

        Completion {
            finished,
            record,
            cycle_closed,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let full = self.settings.seconds_for(self.phase);
        TimerSnapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_seconds,
            running: self.running,
            task_label: self.task_label.clone(),
            progress: f64::from(self.remaining_seconds) * 100.0 / f64::from(full),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::session::pair;
    use chrono::Duration;

    fn user() -> UserId {
        UserId::new("u1")
    }

    fn run(engine: &mut TimerEngine, ticks: u32, user: Option<&UserId>) -> Vec<Completion> {
        let start = Utc::now();
        (0..ticks)
            .filter_map(|i| engine.tick(start + Duration::seconds(i64::from(i)), user))
            .collect()
    }

    #[test]
    fn starts_idle_in_focus_with_default_length() {
        let engine = TimerEngine::default();
        assert_eq!(engine.phase(), Phase::Focus);
        assert_eq!(engine.remaining_seconds(), 25 * 60);
        assert!(!engine.is_running());
        assert_eq!(engine.snapshot().clock(), "25:00");
    }

    #[test]
    fn full_cycle_emits_focus_and_break_and_resets() {
        let user = user();
        for (focus, brk) in [(1, 1), (2, 3), (25, 5), (60, 30)] {
            let mut engine = TimerEngine::new(TimerSettings::new(focus, brk));
            engine.set_task_label("write");
            engine.start();

            let completions = run(&mut engine, (focus + brk) * 60, Some(&user));
            let records: Vec<&NewTaskRecord> = completions.iter().filter_map(|c| c.record.as_ref()).collect();

            assert_eq!(records.len(), 2);
            assert_eq!((records[0].kind, records[0].duration), (RecordKind::Focus, focus));
            assert_eq!((records[1].kind, records[1].duration), (RecordKind::Break, brk));
            assert!(records.iter().all(|r| r.completed && r.task == "write"));
            assert!(completions[1].cycle_closed);

            assert_eq!(engine.phase(), Phase::Focus);
            assert!(!engine.is_running());
            assert_eq!(engine.task_label(), "");
            assert_eq!(engine.remaining_seconds(), focus * 60);
        }
    }

    #[test]
    fn focus_completion_keeps_running_into_break() {
        let mut engine = TimerEngine::new(TimerSettings::new(1, 2));
        engine.start();

        let completions = run(&mut engine, 60, Some(&user()));
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].finished, Phase::Focus);
        assert!(!completions[0].cycle_closed);
        assert_eq!(engine.phase(), Phase::Break);
        assert!(engine.is_running());
        assert_eq!(engine.remaining_seconds(), 120);
    }

    #[test]
    fn no_record_without_label_or_user() {
        let mut engine = TimerEngine::new(TimerSettings::new(1, 1));
        engine.start();
        let completions = run(&mut engine, 120, Some(&user()));
        assert_eq!(completions.len(), 2);
        assert!(completions.iter().all(|c| c.record.is_none()));

        let mut engine = TimerEngine::new(TimerSettings::new(1, 1));
        engine.set_task_label("write");
        engine.start();
        let completions = run(&mut engine, 120, None);
        assert!(completions.iter().all(|c| c.record.is_none()));
    }

    #[test]
    fn stop_rewinds_current_phase_without_emitting() {
        let mut engine = TimerEngine::new(TimerSettings::new(1, 2));
        engine.set_task_label("write");
        engine.start();
        run(&mut engine, 70, Some(&user()));
        assert_eq!(engine.phase(), Phase::Break);

        engine.stop();
        assert_eq!(engine.phase(), Phase::Break);
        assert_eq!(engine.remaining_seconds(), 120);
        assert!(!engine.is_running());
        assert_eq!(engine.task_label(), "write");
        assert!(engine.tick(Utc::now(), Some(&user())).is_none());
    }

    #[test]
    fn pause_keeps_remaining_and_start_is_idempotent() {
        let mut engine = TimerEngine::default();
        assert!(engine.start());
        assert!(!engine.start());
        run(&mut engine, 10, None);

        assert!(engine.pause());
        assert!(!engine.pause());
        assert_eq!(engine.remaining_seconds(), 25 * 60 - 10);
        assert!(engine.tick(Utc::now(), None).is_none());
        assert_eq!(engine.remaining_seconds(), 25 * 60 - 10);
    }

    #[test]
    fn editing_active_phase_length_retargets_countdown() {
        let mut engine = TimerEngine::default();
        engine.start();
        run(&mut engine, 30, None);

        assert_eq!(engine.set_focus_minutes(10), 10);
        assert_eq!(engine.remaining_seconds(), 600);

        // Break is not active, so only future transitions see it.
        assert_eq!(engine.set_break_minutes(7), 7);
        assert_eq!(engine.remaining_seconds(), 600);
    }

    #[test]
    fn editing_lengths_during_a_break() {
        let mut engine = TimerEngine::new(TimerSettings::new(1, 5));
        engine.start();
        run(&mut engine, 70, None);
        assert_eq!(engine.phase(), Phase::Break);

        assert_eq!(engine.set_break_minutes(3), 3);
        assert_eq!(engine.remaining_seconds(), 180);

        // Focus is not active, the break countdown is left alone.
        assert_eq!(engine.set_focus_minutes(5), 5);
        assert_eq!(engine.remaining_seconds(), 180);
        assert!(engine.is_running());
    }

    #[test]
    fn emitted_records_pair_into_one_session() {
        let user = user();
        for (focus, brk) in [(1, 3), (25, 5), (50, 10)] {
            let mut engine = TimerEngine::new(TimerSettings::new(focus, brk));
            engine.set_task_label("write");
            engine.start();

            let records: Vec<_> = run(&mut engine, (focus + brk) * 60, Some(&user))
                .into_iter()
                .filter_map(|c| c.record)
                .zip(1..)
                .map(|(record, id)| record.with_id(id))
                .collect();

            let sessions = pair(&records);
            assert_eq!(sessions.len(), 1);
            assert!(sessions[0].paired_break.is_some());
            assert_eq!(sessions[0].total_duration(), focus + brk);
        }
    }

    #[test]
    fn lengths_are_clamped_to_range() {
        let mut engine = TimerEngine::default();
        assert_eq!(engine.set_focus_minutes(0), 1);
        assert_eq!(engine.set_focus_minutes(90), 60);
        assert_eq!(engine.set_break_minutes(45), 30);
        assert_eq!(TimerSettings::new(0, 0), TimerSettings::new(1, 1));
    }
}

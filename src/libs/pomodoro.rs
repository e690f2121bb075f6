//! Drives a [`TimerEngine`] from a [`Ticker`] and carries out completions.
//!
//! On every completed interval the driver plays the cue, appends the record
//! (when there is one) through the live feed, and re-syncs the ticker with the
//! engine. Store and cue failures are logged; they never undo the phase change.

use super::cue::Cue;
use super::feed::LiveRecords;
use super::record::UserId;
use super::store::RecordStore;
use super::ticker::Ticker;
use super::timer::{Completion, TimerEngine, TimerSettings, TimerSnapshot};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct Pomodoro<S: RecordStore> {
    engine: TimerEngine,
    ticker: Ticker,
    records: Arc<LiveRecords<S>>,
    cue: Box<dyn Cue>,
}

impl<S: RecordStore> Pomodoro<S> {
    pub fn new(settings: TimerSettings, records: Arc<LiveRecords<S>>, cue: Box<dyn Cue>) -> Self {
        Self {
            engine: TimerEngine::new(settings),
            ticker: Ticker::new(),
            records,
            cue,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn start(&mut self) -> bool {
        let started = self.engine.start();
        self.ticker.sync(self.engine.is_running());
        started
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.engine.pause();
        self.ticker.sync(self.engine.is_running());
        paused
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.ticker.sync(self.engine.is_running());
    }

    pub fn set_task_label(&mut self, label: impl Into<String>) {
        self.engine.set_task_label(label);
    }

    pub fn set_focus_minutes(&mut self, minutes: u32) -> u32 {
        self.engine.set_focus_minutes(minutes)
    }

    pub fn set_break_minutes(&mut self, minutes: u32) -> u32 {
        self.engine.set_break_minutes(minutes)
    }

    /// Wait for the next one-second tick. Pends forever while not running.
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await;
    }

    /// Apply one elapsed second.
    pub fn on_tick(&mut self, now: DateTime<Utc>, user: Option<&UserId>) -> Option<Completion> {
        let completion = self.engine.tick(now, user);
        if let Some(completion) = &completion {
            self.complete(completion);
        }
        self.ticker.sync(self.engine.is_running());
        completion
    }

    fn complete(&mut self, completion: &Completion) {
        if let Err(err) = self.cue.play(completion.finished) {
            debug!(error = %err, "completion cue failed");
        }

        let Some(record) = &completion.record else {
            debug!(phase = ?completion.finished, "interval completed without a record");
            return;
        };

        match self.records.append(record) {
            Ok(stored) => info!(id = stored.id, kind = %stored.kind, task = %stored.task, "record saved"),
            Err(err) => error!(error = %err, kind = %record.kind, "failed to save record"),
        }
    }
}

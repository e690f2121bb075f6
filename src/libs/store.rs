//! Persistence seams for records and goals.
//!
//! The timer, the feed and the commands only talk to these traits. The SQLite
//! backends live in `crate::db`; [`MemoryStore`] keeps everything in process
//! and backs the tests and throwaway sessions.

use super::error::StoreError;
use super::goal::{Goal, NewGoal, StandingGoals};
use super::record::{NewTaskRecord, RecordQuery, TaskRecord, UserId};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Append-only log of completed intervals, scoped per user.
pub trait RecordStore: Send + Sync {
    /// Persist a record and return it with its assigned id.
    fn append(&self, record: &NewTaskRecord) -> Result<TaskRecord, StoreError>;

    /// Records of one user matching the query, newest first.
    fn query(&self, user: &UserId, query: &RecordQuery) -> Result<Vec<TaskRecord>, StoreError>;
}

/// Named goals plus the per-user standing daily/weekly targets.
pub trait GoalStore: Send + Sync {
    fn create_goal(&self, goal: &NewGoal) -> Result<Goal, StoreError>;

    /// Removing a goal that does not exist is not an error.
    fn delete_goal(&self, user: &UserId, id: i64) -> Result<(), StoreError>;

    fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError>;

    /// `None` until the user saves standing goals for the first time.
    fn standing_goals(&self, user: &UserId) -> Result<Option<StandingGoals>, StoreError>;

    /// Create or replace the user's standing goals.
    fn save_standing_goals(&self, user: &UserId, goals: &StandingGoals) -> Result<(), StoreError>;
}

/// Sort newest first and apply the query limit.
pub(crate) fn finish_query(mut records: Vec<TaskRecord>, query: &RecordQuery) -> Vec<TaskRecord> {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    if let Some(limit) = query.limit {
        records.truncate(limit);
    }
    records
}

#[derive(Default)]
struct MemoryState {
    records: Vec<TaskRecord>,
    goals: Vec<Goal>,
    standing: HashMap<UserId, StandingGoals>,
    next_record_id: i64,
    next_goal_id: i64,
}

/// In-process store implementing both traits.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn append(&self, record: &NewTaskRecord) -> Result<TaskRecord, StoreError> {
        let mut state = self.state.lock();
        state.next_record_id += 1;
        let stored = record.clone().with_id(state.next_record_id);
        state.records.push(stored.clone());
        Ok(stored)
    }

    fn query(&self, user: &UserId, query: &RecordQuery) -> Result<Vec<TaskRecord>, StoreError> {
        let state = self.state.lock();
        let matching = state
            .records
            .iter()
            .filter(|r| &r.user_id == user && query.matches(r))
            .cloned()
            .collect();
        Ok(finish_query(matching, query))
    }
}

impl GoalStore for MemoryStore {
    fn create_goal(&self, goal: &NewGoal) -> Result<Goal, StoreError> {
        let mut state = self.state.lock();
        state.next_goal_id += 1;
        let stored = Goal {
            id: state.next_goal_id,
            user_id: goal.user_id.clone(),
            title: goal.title.clone(),
            target_minutes: goal.target_minutes,
            created_at: Utc::now(),
        };
        state.goals.push(stored.clone());
        Ok(stored)
    }

    fn delete_goal(&self, user: &UserId, id: i64) -> Result<(), StoreError> {
        self.state.lock().goals.retain(|g| !(g.id == id && &g.user_id == user));
        Ok(())
    }

    fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError> {
        let state = self.state.lock();
        Ok(state.goals.iter().filter(|g| &g.user_id == user).cloned().collect())
    }

    fn standing_goals(&self, user: &UserId) -> Result<Option<StandingGoals>, StoreError> {
        Ok(self.state.lock().standing.get(user).copied())
    }

    fn save_standing_goals(&self, user: &UserId, goals: &StandingGoals) -> Result<(), StoreError> {
        self.state.lock().standing.insert(user.clone(), *goals);
        Ok(())
    }
}

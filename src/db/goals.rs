//! SQLite backend for named and standing goals.

use crate::db::db::Db;
use crate::libs::error::StoreError;
use crate::libs::goal::{Goal, NewGoal, StandingGoals};
use crate::libs::record::UserId;
use crate::libs::store::GoalStore;
use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

pub struct Goals {
    db: Db,
}

impl Goals {
    pub fn new() -> Result<Self> {
        Ok(Self { db: Db::new()? })
    }

    pub fn from_db(db: &Db) -> Self {
        Self { db: db.clone() }
    }
}

impl GoalStore for Goals {
    fn create_goal(&self, goal: &NewGoal) -> Result<Goal, StoreError> {
        let conn = self.db.conn.lock();
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO goals (user_id, title, target_minutes, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![goal.user_id.as_str(), goal.title, goal.target_minutes, created_at],
        )?;

        Ok(Goal {
            id: conn.last_insert_rowid(),
            user_id: goal.user_id.clone(),
            title: goal.title.clone(),
            target_minutes: goal.target_minutes,
            created_at,
        })
    }

    fn delete_goal(&self, user: &UserId, id: i64) -> Result<(), StoreError> {
        self.db
            .conn
            .lock()
            .execute("DELETE FROM goals WHERE id = ?1 AND user_id = ?2", params![id, user.as_str()])?;
        Ok(())
    }

    fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError> {
        let conn = self.db.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, user_id, title, target_minutes, created_at FROM goals WHERE user_id = ?1 ORDER BY created_at, id",
        )?;

        let goals = stmt
            .query_map(params![user.as_str()], |row| {
                Ok(Goal {
                    id: row.get(0)?,
                    user_id: UserId::new(row.get::<_, String>(1)?),
                    title: row.get(2)?,
                    target_minutes: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(goals)
    }

    fn standing_goals(&self, user: &UserId) -> Result<Option<StandingGoals>, StoreError> {
        let conn = self.db.conn.lock();
        let goals = conn
            .query_row(
                "SELECT daily_minutes, weekly_minutes FROM standing_goals WHERE user_id = ?1",
                params![user.as_str()],
                |row| {
                    Ok(StandingGoals {
                        daily_minutes: row.get(0)?,
                        weekly_minutes: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(goals)
    }

    fn save_standing_goals(&self, user: &UserId, goals: &StandingGoals) -> Result<(), StoreError> {
        self.db.conn.lock().execute(
            "INSERT INTO standing_goals (user_id, daily_minutes, weekly_minutes) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                daily_minutes = excluded.daily_minutes,
                weekly_minutes = excluded.weekly_minutes,
                updated_at = CURRENT_TIMESTAMP",
            params![user.as_str(), goals.daily_minutes, goals.weekly_minutes],
        )?;
        Ok(())
    }
}

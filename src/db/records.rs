//! SQLite backend for the task record log.

use crate::db::db::Db;
use crate::libs::error::StoreError;
use crate::libs::record::{NewTaskRecord, RecordKind, RecordQuery, TaskRecord, UserId};
use crate::libs::store::RecordStore;
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Row};

const SELECT_RECORDS: &str = "SELECT id, user_id, task, duration, type, completed, timestamp
    FROM task_records
    WHERE user_id = ?1
      AND (?2 IS NULL OR type = ?2)
      AND (?3 IS NULL OR task = ?3)
      AND (?4 IS NULL OR timestamp >= ?4)
    ORDER BY timestamp DESC, id ASC
    LIMIT ?5";

pub struct Records {
    db: Db,
}

impl Records {
    pub fn new() -> Result<Self> {
        Ok(Self { db: Db::new()? })
    }

    pub fn from_db(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    fn from_row(row: &Row) -> rusqlite::Result<TaskRecord> {
        let kind: String = row.get(4)?;
        let kind = kind
            .parse::<RecordKind>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?;

        Ok(TaskRecord {
            id: row.get(0)?,
            user_id: UserId::new(row.get::<_, String>(1)?),
            task: row.get(2)?,
            duration: row.get(3)?,
            kind,
            completed: row.get(5)?,
            timestamp: row.get(6)?,
        })
    }
}

impl RecordStore for Records {
    fn append(&self, record: &NewTaskRecord) -> Result<TaskRecord, StoreError> {
        let conn = self.db.conn.lock();
        conn.execute(
            "INSERT INTO task_records (user_id, task, duration, type, completed, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.user_id.as_str(),
                record.task,
                record.duration,
                record.kind.as_str(),
                record.completed,
                record.timestamp,
            ],
        )?;

        Ok(record.clone().with_id(conn.last_insert_rowid()))
    }

    fn query(&self, user: &UserId, query: &RecordQuery) -> Result<Vec<TaskRecord>, StoreError> {
        let conn = self.db.conn.lock();
        let mut stmt = conn.prepare(SELECT_RECORDS)?;
        // SQLite treats a negative LIMIT as no limit
        let limit = query.limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let records = stmt
            .query_map(
                params![
                    user.as_str(),
                    query.kind.map(|k| k.as_str()),
                    query.task.as_deref(),
                    query.since,
                    limit,
                ],
                Self::from_row,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }
}

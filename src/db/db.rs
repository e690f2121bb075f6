use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "tomato.db";

/// Shared handle to the SQLite database.
///
/// Cloning is cheap; [`Records`](super::records::Records) and
/// [`Goals`](super::goals::Goals) opened from the same `Db` share one
/// connection.
#[derive(Clone)]
pub struct Db {
    pub conn: Arc<Mutex<Connection>>,
}

impl Db {
    /// Open the database in the data directory, applying pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(db_file_path)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let mut conn = Connection::open(path)?;
        init_with_migrations(&mut conn)?;
        Ok(Self::wrap(conn))
    }

    pub fn open_in_memory() -> Result<Db> {
        let mut conn = Connection::open_in_memory()?;
        init_with_migrations(&mut conn)?;
        Ok(Self::wrap(conn))
    }

    /// Open without touching the schema.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Db> {
        Ok(Self::wrap(Connection::open(path)?))
    }

    fn wrap(conn: Connection) -> Db {
        Db {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

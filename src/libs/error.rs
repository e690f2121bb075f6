//! Error types shared by the store adapters and the goal tracker.
//!
//! None of these errors is fatal for the timer. Store failures are logged and
//! degrade to a missing record or an empty feed; validation failures are
//! reported back to the user before anything reaches the store.

use thiserror::Error;

/// Failure reported by a record or goal store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write or read itself failed (offline, locked, permission denied).
    #[error("failed to persist data: {0}")]
    Persistence(String),

    /// The query needs schema or index support the store does not have.
    #[error("store is missing a required table or index: {0}")]
    Precondition(String),
}

impl StoreError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, StoreError::Precondition(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        let text = err.to_string();
        let missing_schema = ["no such table", "no such column", "no such index"]
            .iter()
            .any(|needle| text.contains(needle));

        if missing_schema {
            StoreError::Precondition(text)
        } else {
            StoreError::Persistence(text)
        }
    }
}

/// Rejected input for goals, raised before the store is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("goal title must not be empty")]
    EmptyLabel,

    #[error("target minutes must be greater than zero, got {0}")]
    NonPositiveTarget(i64),
}

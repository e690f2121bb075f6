//! Core library modules for tomato.
//!
//! The domain types (records, sessions, goals, statistics) are plain data and
//! pure functions. Persistence sits behind the traits in [`store`], and the
//! live pieces ([`feed`], [`context`], [`pomodoro`]) tie them together for the
//! interactive timer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tomato::libs::record::{RecordQuery, UserId};
//! use tomato::libs::session::pair;
//! use tomato::libs::store::{MemoryStore, RecordStore};
//!
//! let store = MemoryStore::new();
//! let records = store.query(&UserId::new("ana"), &RecordQuery::all())?;
//! let sessions = pair(&records);
//! # Ok::<(), tomato::libs::error::StoreError>(())
//! ```

pub mod config;
pub mod context;
pub mod cue;
pub mod data_storage;
pub mod error;
pub mod feed;
pub mod formatter;
pub mod goal;
pub mod history;
pub mod identity;
pub mod messages;
pub mod pomodoro;
pub mod record;
pub mod session;
pub mod stats;
pub mod store;
pub mod ticker;
pub mod timer;
pub mod view;

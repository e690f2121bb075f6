//! SQLite persistence.
//!
//! [`db::Db`] opens the database in the data directory and applies
//! [`migrations`]. [`records::Records`] and [`goals::Goals`] implement the
//! store traits from [`crate::libs::store`] on top of it.

pub mod db;
pub mod goals;
pub mod migrations;
pub mod records;

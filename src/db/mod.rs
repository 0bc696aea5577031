//! Data store access
//!
//! The query layer only sees the [`DataStore`] trait; [`SqliteStore`] is the
//! production implementation over the read-only dataset file.

pub mod sqlite;
pub mod store;

pub use sqlite::SqliteStore;
pub use store::{BindValue, DataStore, Row, StoreError};

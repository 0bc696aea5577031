//! Data store abstraction
//!
//! Defines the narrow query/execute interface the query service depends on.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// A single result row, keyed by column name (or column alias)
pub type Row = Map<String, Value>;

/// A value bound into a positional `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    /// Integer parameter (ids, years, rounds)
    Integer(i64),
    /// Text parameter (refs, surname prefixes)
    Text(String),
}

/// Errors reported by a data store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The engine failed to open, prepare or execute a statement
    #[error(transparent)]
    Query(#[from] sqlx::Error),

    /// A column held a value that could not be represented as JSON
    #[error("Unsupported value in column '{0}'")]
    UnsupportedValue(String),
}

/// Read-only query interface over the dataset
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Run `sql` with `binds` applied in placeholder order and return every row
    async fn fetch_all(&self, sql: &str, binds: &[BindValue]) -> Result<Vec<Row>, StoreError>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

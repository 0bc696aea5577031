//! SQLite-backed data store
//!
//! Opens the dataset file read-only once at startup and serves every request
//! from the same connection pool.

use crate::db::store::{BindValue, DataStore, Row, StoreError};
use async_trait::async_trait;
use serde_json::{Number, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row as _, SqlitePool, TypeInfo, ValueRef};
use std::cmp::Ordering;
use std::str::FromStr;
use tracing::{debug, info};

/// Collation comparing text after Unicode lowercase folding
pub const UNICODE_NOCASE: &str = "UNICODE_NOCASE";

/// Read-only SQLite data store
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open an existing dataset file read-only
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file (a `sqlite:` prefix is accepted)
    /// * `max_connections` - Pool size; every connection is read-only
    ///
    /// # Returns
    /// * `Ok(SqliteStore)` if the file exists and could be opened
    /// * `Err(StoreError)` otherwise; the file is never created
    pub async fn open_read_only(db_path: &str, max_connections: u32) -> Result<Self, StoreError> {
        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = with_collations(
            SqliteConnectOptions::from_str(&connection_string)?
                .read_only(true)
                .create_if_missing(false),
        );

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        info!("Opened SQLite dataset read-only at: {}", db_path);
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn fetch_all(&self, sql: &str, binds: &[BindValue]) -> Result<Vec<Row>, StoreError> {
        let mut query = sqlx::query(sql);
        for bind in binds {
            query = match bind {
                BindValue::Integer(value) => query.bind(*value),
                BindValue::Text(value) => query.bind(value.clone()),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), "Fetched rows");

        rows.iter().map(row_to_json).collect()
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Register the collations query templates rely on
pub fn with_collations(options: SqliteConnectOptions) -> SqliteConnectOptions {
    options.collation(UNICODE_NOCASE, unicode_nocase)
}

/// Compare two strings ignoring case, for any script SQLite's `NOCASE` skips
pub fn unicode_nocase(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Convert a row into a flat JSON map using the storage class of each value
fn row_to_json(row: &SqliteRow) -> Result<Row, StoreError> {
    let mut map = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let raw = row.try_get_raw(index)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" | "BOOLEAN" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" | "NUMERIC" => {
                    let float = row.try_get_unchecked::<f64, _>(index)?;
                    Number::from_f64(float)
                        .map(Value::Number)
                        .ok_or_else(|| StoreError::UnsupportedValue(column.name().to_string()))?
                }
                "BLOB" => {
                    let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
            }
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}

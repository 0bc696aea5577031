//! Query service
//!
//! One generic dispatch routine serves every entry of the operation table:
//! validate, execute, check for an empty result, shape.

use crate::db::DataStore;
use crate::error::AppError;
use crate::query::operations::{Cardinality, Operation};
use crate::query::params::bind_params;
use crate::query::shape::nest;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Executes operations against an injected data store
#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn DataStore>,
}

impl QueryService {
    /// Create a service over `store`
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// Run `op` with the raw path parameters captured by the router
    ///
    /// # Returns
    /// * `Ok(Value)` - an object for single lookups, a non-empty array otherwise
    /// * `Err(AppError::InvalidParameter)` - validation failed; the store was not called
    /// * `Err(AppError::NotFound)` - the query matched no rows
    /// * `Err(AppError::DataStore)` - the store failed
    pub async fn run(
        &self,
        op: &Operation,
        raw: &HashMap<String, String>,
    ) -> Result<Value, AppError> {
        let params = bind_params(op.params, op.range.as_ref(), raw).map_err(|e| {
            warn!(operation = op.name, error = %e, "Rejected request parameters");
            e
        })?;

        let rows = self
            .store
            .fetch_all(op.sql, params.binds())
            .await
            .map_err(|e| {
                error!(operation = op.name, error = %e, "Query failed");
                AppError::from(e)
            })?;

        if rows.is_empty() {
            let message = params.render(op.not_found);
            debug!(operation = op.name, "{}", message);
            return Err(AppError::NotFound(message));
        }

        debug!(operation = op.name, rows = rows.len(), "Query succeeded");

        match op.cardinality {
            Cardinality::One => rows
                .into_iter()
                .next()
                .map(nest)
                .unwrap_or_else(|| Err(AppError::NotFound(params.render(op.not_found)))),
            Cardinality::Many => rows
                .into_iter()
                .map(nest)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
        }
    }

    /// Check the underlying store is reachable
    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await.map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{BindValue, Row, StoreError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Returns canned rows and records every call
    struct RecordingStore {
        rows: Vec<Row>,
        fail: bool,
        calls: AtomicUsize,
        last_binds: Mutex<Vec<BindValue>>,
    }

    impl RecordingStore {
        fn with_rows(rows: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                rows: rows
                    .into_iter()
                    .map(|v| v.as_object().cloned().unwrap())
                    .collect(),
                fail: false,
                calls: AtomicUsize::new(0),
                last_binds: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                rows: Vec::new(),
                fail: true,
                calls: AtomicUsize::new(0),
                last_binds: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DataStore for RecordingStore {
        async fn fetch_all(
            &self,
            _sql: &str,
            binds: &[BindValue],
        ) -> Result<Vec<Row>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_binds.lock().unwrap() = binds.to_vec();
            if self.fail {
                return Err(StoreError::Query(sqlx::Error::Protocol(
                    "disk I/O error".to_string(),
                )));
            }
            Ok(self.rows.clone())
        }

        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn op(name: &str) -> &'static Operation {
        Operation::by_name(name).unwrap()
    }

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_invalid_integer_never_reaches_store() {
        let store = RecordingStore::with_rows(vec![json!({ "raceId": 1 })]);
        let service = QueryService::new(store.clone());

        for name in [
            "drivers_in_race",
            "get_race",
            "race_results",
            "race_qualifying",
            "driver_standings",
            "constructor_standings",
        ] {
            let result = service.run(op(name), &raw(&[("raceId", "abc")])).await;
            assert!(matches!(result, Err(AppError::InvalidParameter(_))));
        }
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_inverted_range_never_reaches_store() {
        let store = RecordingStore::with_rows(vec![json!({ "raceId": 1 })]);
        let service = QueryService::new(store.clone());

        let result = service
            .run(
                op("driver_results_in_seasons"),
                &raw(&[("ref", "hamilton"), ("start", "2022"), ("end", "2020")]),
            )
            .await;

        assert!(matches!(result, Err(AppError::InvalidParameter(_))));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_result_is_not_found_with_key() {
        let store = RecordingStore::with_rows(vec![]);
        let service = QueryService::new(store.clone());

        match service
            .run(op("get_driver"), &raw(&[("ref", "nobody")]))
            .await
        {
            Err(AppError::NotFound(message)) => assert!(message.contains("nobody")),
            other => panic!("Expected NotFound error, got: {:?}", other),
        }
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn test_single_lookup_returns_first_row_as_object() {
        let store = RecordingStore::with_rows(vec![json!({
            "raceId": 1077,
            "year": 2022,
            "round": 4
        })]);
        let service = QueryService::new(store.clone());

        let value = service
            .run(
                op("race_by_round"),
                &raw(&[("year", "2022"), ("round", "4")]),
            )
            .await
            .unwrap();

        assert_eq!(value, json!({ "raceId": 1077, "year": 2022, "round": 4 }));
        assert_eq!(
            *store.last_binds.lock().unwrap(),
            vec![BindValue::Integer(2022), BindValue::Integer(4)]
        );
    }

    #[tokio::test]
    async fn test_collection_is_shaped_array() {
        let store = RecordingStore::with_rows(vec![
            json!({ "grid": 1, "driver.code": "LEC" }),
            json!({ "grid": 2, "driver.code": "VER" }),
        ]);
        let service = QueryService::new(store);

        let value = service
            .run(op("race_results"), &raw(&[("raceId", "1074")]))
            .await
            .unwrap();

        assert_eq!(
            value,
            json!([
                { "grid": 1, "driver": { "code": "LEC" } },
                { "grid": 2, "driver": { "code": "VER" } }
            ])
        );
    }

    #[tokio::test]
    async fn test_search_binds_raw_prefix() {
        let store = RecordingStore::with_rows(vec![json!({ "surname": "Schumacher" })]);
        let service = QueryService::new(store.clone());

        service
            .run(op("search_drivers"), &raw(&[("prefix", "Sch_")]))
            .await
            .unwrap();

        assert_eq!(
            *store.last_binds.lock().unwrap(),
            vec![BindValue::Text("Sch_".to_string())]
        );
    }

    #[tokio::test]
    async fn test_store_failure_is_data_store_error() {
        let service = QueryService::new(RecordingStore::failing());

        match service.run(op("list_circuits"), &raw(&[])).await {
            Err(AppError::DataStore(e)) => assert!(e.to_string().contains("disk I/O error")),
            other => panic!("Expected DataStore error, got: {:?}", other),
        }
    }
}

//! Response shaping
//!
//! Query templates alias joined columns as `"entity.field"`; this folds those
//! dotted keys into nested objects so foreign keys are replaced by the
//! related entity's fields.

use crate::db::Row;
use crate::error::AppError;
use serde_json::{Map, Value};

/// Fold dotted column names into nested objects
pub fn nest(row: Row) -> Result<Value, AppError> {
    let mut out = Map::new();

    for (key, value) in row {
        let mut path = key.split('.').peekable();
        let mut target = &mut out;

        while let Some(segment) = path.next() {
            if path.peek().is_none() {
                if target.contains_key(segment) {
                    return Err(collision(&key));
                }
                target.insert(segment.to_string(), value);
                break;
            }

            let child = target
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            target = match child {
                Value::Object(map) => map,
                _ => return Err(collision(&key)),
            };
        }
    }

    Ok(Value::Object(out))
}

fn collision(key: &str) -> AppError {
    AppError::Internal(anyhow::anyhow!(
        "Column '{}' collides with another column in the result shape",
        key
    ))
}

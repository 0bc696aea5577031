//! Path parameter validation
//!
//! Turns the raw strings captured by the router into bind values, rejecting
//! anything that fails a type or range check before a query is attempted.

use crate::db::BindValue;
use crate::error::AppError;
use std::collections::HashMap;

/// How a path parameter is validated and bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Must parse as a signed integer
    Integer,
    /// Free text, bound verbatim
    Text,
    /// Free text matched as a literal prefix; may be absent
    Prefix,
}

/// Declaration of one path parameter of an operation
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// Name of the path segment capture (`:name` in the route)
    pub name: &'static str,
    /// Human-readable label used in validation messages
    pub label: &'static str,
    /// Validation rule
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Integer-typed parameter
    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Integer,
        }
    }

    /// Free-text parameter
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Text,
        }
    }

    /// Prefix-search parameter
    pub const fn prefix(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ParamKind::Prefix,
        }
    }
}

/// Two integer parameters that must satisfy `start <= end`
#[derive(Debug, Clone, Copy)]
pub struct RangeSpec {
    /// Name of the lower bound parameter
    pub start: &'static str,
    /// Name of the upper bound parameter
    pub end: &'static str,
}

/// Validated parameters, ready to bind
#[derive(Debug, Clone, Default)]
pub struct BoundParams {
    binds: Vec<BindValue>,
    display: Vec<(&'static str, String)>,
}

impl BoundParams {
    /// Bind values in declaration order
    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Fill `{name}` placeholders in `template` with the validated values
    pub fn render(&self, template: &str) -> String {
        self.display
            .iter()
            .fold(template.to_string(), |message, (name, value)| {
                message.replace(&format!("{{{}}}", name), value)
            })
    }

    fn integer(&self, name: &str) -> Option<i64> {
        self.display
            .iter()
            .position(|(n, _)| *n == name)
            .and_then(|i| match self.binds.get(i) {
                Some(BindValue::Integer(v)) => Some(*v),
                _ => None,
            })
    }
}

/// Validate `raw` path parameters against `specs` and the optional range rule
///
/// Integer checks run first, in declaration order; the range rule runs only
/// once every bound has parsed.
pub fn bind_params(
    specs: &[ParamSpec],
    range: Option<&RangeSpec>,
    raw: &HashMap<String, String>,
) -> Result<BoundParams, AppError> {
    let mut bound = BoundParams::default();

    for spec in specs {
        let value = raw.get(spec.name).map(String::as_str);
        let (bind, display) = match (spec.kind, value) {
            (ParamKind::Integer, Some(value)) => {
                let parsed = parse_integer(value).ok_or_else(|| {
                    AppError::InvalidParameter(format!(
                        "{} must be an integer, got '{}'",
                        spec.label, value
                    ))
                })?;
                (BindValue::Integer(parsed), parsed.to_string())
            }
            (ParamKind::Text, Some(value)) => {
                (BindValue::Text(value.to_string()), value.to_string())
            }
            (ParamKind::Prefix, value) => {
                let value = value.unwrap_or_default();
                (BindValue::Text(value.to_string()), value.to_string())
            }
            (_, None) => {
                return Err(AppError::InvalidParameter(format!(
                    "Missing path parameter '{}'",
                    spec.name
                )))
            }
        };
        bound.binds.push(bind);
        bound.display.push((spec.name, display));
    }

    if let Some(range) = range {
        if let (Some(start), Some(end)) = (bound.integer(range.start), bound.integer(range.end)) {
            if end < start {
                return Err(AppError::InvalidParameter(format!(
                    "End year ({}) must not be before start year ({})",
                    end, start
                )));
            }
        }
    }

    Ok(bound)
}

fn parse_integer(value: &str) -> Option<i64> {
    value.parse::<i64>().ok()
}

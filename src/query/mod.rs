//! Query layer
//!
//! Maps validated request parameters onto fixed, parameterized query
//! templates and shapes the rows into JSON.

pub mod operations;
pub mod params;
pub mod service;
pub mod shape;

pub use operations::{Cardinality, Operation, OPERATIONS};
pub use service::QueryService;

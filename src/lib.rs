//! F1 Query Backend Library
//!
//! Read-only HTTP query layer over a historical motorsport dataset.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod query;
/// Shared application state
pub mod state;

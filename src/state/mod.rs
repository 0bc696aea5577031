// State management module
// Holds the shared, read-only application state handed to every handler

/// Application state container
pub mod app_state;

pub use app_state::AppState;

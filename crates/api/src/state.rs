//! Application state shared across handlers.

use query::QueryService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Read-model query service.
    pub query: QueryService,
}

impl AppState {
    /// Create new application state.
    pub fn new(query: QueryService) -> Self {
        Self { query }
    }
}

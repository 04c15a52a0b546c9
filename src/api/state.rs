//! Application state for the Roster Engine API.

use std::sync::Arc;

use crate::engine::RosterEngine;

/// Shared application state.
///
/// Holds the engine, and through it the store, geocoder, clock and
/// configuration every handler works against.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RosterEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: RosterEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &RosterEngine {
        &self.engine
    }
}

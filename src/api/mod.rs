//! HTTP API module for the Roster Engine.
//!
//! This module exposes availability checks, candidate search, shift status
//! and check-in/check-out as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AvailabilityRequest, CandidatesRequest, StatusRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;

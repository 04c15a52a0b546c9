//! Scheduling engine operations.
//!
//! This module contains the engine proper:
//!
//! - [`distance`]: great-circle distance between coordinates
//! - [`ranking`]: candidate ordering by proximity and wage
//! - [`availability`]: whether one employee can take one shift
//! - [`candidates`]: eligible-candidate search over the whole pool
//! - [`status`]: shift lifecycle state and display text
//! - [`clock_events`]: check-in and check-out writes
//!
//! [`RosterEngine`] ties them to a set of collaborators.

pub mod availability;
pub mod candidates;
pub mod clock_events;
pub mod distance;
pub mod ranking;
mod service;
pub mod status;

pub use availability::{
    Availability, UnavailableReason, check_availability, find_unavailable_reason,
};
pub use candidates::{CandidateQuery, SearchContext, find_candidates};
pub use clock_events::ClockEventRecorder;
pub use distance::{EARTH_RADIUS_KM, NEAR_DISTANCE_KM, NEAR_THRESHOLD_DEGREES, distance_km};
pub use ranking::{DEFAULT_EQUAL_DISTANCE_THRESHOLD_KM, compare_candidates, rank_candidates};
pub use service::RosterEngine;
pub use status::{ShiftStatus, ShiftTimes, StatusReport, compute_status, evaluate, status_message};

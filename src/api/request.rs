//! Request types for the Roster Engine API.
//!
//! Shift bounds arrive as two flat timestamps and are validated into a
//! [`ShiftWindow`] before any engine call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::engine::{CandidateQuery, ShiftTimes};
use crate::error::EngineResult;
use crate::models::{Coordinates, Role, ShiftWindow};

/// Request body for `POST /availability`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    /// The employee to check.
    pub employee_id: String,
    /// Start of the proposed shift.
    pub shift_start: NaiveDateTime,
    /// End of the proposed shift.
    pub shift_end: NaiveDateTime,
    /// Event whose own assignments are ignored (when editing an event).
    #[serde(default)]
    pub exclude_event_id: Option<String>,
}

impl AvailabilityRequest {
    /// The validated shift window.
    pub fn window(&self) -> EngineResult<ShiftWindow> {
        ShiftWindow::new(self.shift_start, self.shift_end)
    }
}

/// Request body for `POST /candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesRequest {
    /// Restrict the search to one role.
    #[serde(default)]
    pub role: Option<Role>,
    /// Start of the shift to fill.
    pub shift_start: NaiveDateTime,
    /// End of the shift to fill.
    pub shift_end: NaiveDateTime,
    /// Event address, geocoded when coordinates are absent.
    #[serde(default)]
    pub event_address: Option<String>,
    /// Event coordinates, if known.
    #[serde(default)]
    pub event_coordinates: Option<Coordinates>,
    /// Event whose own assignments are ignored.
    #[serde(default)]
    pub exclude_event_id: Option<String>,
}

impl TryFrom<CandidatesRequest> for CandidateQuery {
    type Error = crate::error::EngineError;

    fn try_from(request: CandidatesRequest) -> Result<Self, Self::Error> {
        Ok(CandidateQuery {
            role: request.role,
            window: ShiftWindow::new(request.shift_start, request.shift_end)?,
            event_address: request.event_address,
            event_coordinates: request.event_coordinates,
            exclude_event_id: request.exclude_event_id,
        })
    }
}

/// Request body for `POST /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusRequest {
    /// Scheduled start.
    pub shift_start: NaiveDateTime,
    /// Scheduled end.
    pub shift_end: NaiveDateTime,
    /// Recorded check-in.
    #[serde(default)]
    pub clock_in_at: Option<NaiveDateTime>,
    /// Recorded check-out.
    #[serde(default)]
    pub clock_out_at: Option<NaiveDateTime>,
    /// Evaluate at this instant instead of the server clock.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

impl StatusRequest {
    /// The shift with its clock events.
    pub fn shift(&self) -> EngineResult<ShiftTimes> {
        Ok(ShiftTimes {
            window: ShiftWindow::new(self.shift_start, self.shift_end)?,
            clock_in_at: self.clock_in_at,
            clock_out_at: self.clock_out_at,
        })
    }
}

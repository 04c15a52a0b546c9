//! Time-off request model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Approval status of a time-off request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOffStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the employee cannot be scheduled during the request.
    Accepted,
    /// Rejected.
    Denied,
}

/// A request by an employee to be off work for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeOffRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// First instant off.
    pub start: NaiveDateTime,
    /// Last instant off.
    pub end: NaiveDateTime,
    /// Approval status.
    pub status: TimeOffStatus,
}

impl TimeOffRequest {
    /// Returns true if the request has been approved.
    pub fn is_accepted(&self) -> bool {
        self.status == TimeOffStatus::Accepted
    }
}

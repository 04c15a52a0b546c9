//! Clock record model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::AssignmentRef;

/// The check-in/check-out timestamps recorded against one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockRecord {
    /// The assignment this record belongs to.
    pub assignment: AssignmentRef,
    /// When the assignee checked in.
    pub clock_in_at: Option<NaiveDateTime>,
    /// When the assignee checked out.
    pub clock_out_at: Option<NaiveDateTime>,
}

impl ClockRecord {
    /// A record checked in at `at`.
    pub fn checked_in(assignment: AssignmentRef, at: NaiveDateTime) -> Self {
        Self {
            assignment,
            clock_in_at: Some(at),
            clock_out_at: None,
        }
    }

    /// Returns true once a check-in has been recorded.
    pub fn is_checked_in(&self) -> bool {
        self.clock_in_at.is_some()
    }
}

//! Shift window and assignment types.
//!
//! An assignment links an event to either a server (an employee working the
//! event) or a truck (a truck and the employee driving it). Both carry a
//! [`ShiftWindow`].

use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The scheduled start and end of a piece of work.
///
/// The end is always strictly after the start; construction and
/// deserialization both reject anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawShiftWindow")]
pub struct ShiftWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawShiftWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawShiftWindow> for ShiftWindow {
    type Error = EngineError;

    fn try_from(raw: RawShiftWindow) -> Result<Self, Self::Error> {
        ShiftWindow::new(raw.start, raw.end)
    }
}

impl ShiftWindow {
    /// Creates a window, failing if `end` is not after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster_engine::models::ShiftWindow;
    /// use chrono::NaiveDateTime;
    ///
    /// let start = NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2026-03-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert!(ShiftWindow::new(start, end).is_ok());
    /// assert!(ShiftWindow::new(end, start).is_err());
    /// ```
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> EngineResult<Self> {
        if end <= start {
            return Err(EngineError::InvalidShiftWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The scheduled start.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The scheduled end.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// The calendar weekday the window starts on.
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Returns the window grown by `margin` on both sides.
    pub fn widened(&self, margin: Duration) -> Self {
        Self {
            start: self.start - margin,
            end: self.end + margin,
        }
    }

    /// Returns true if `[start, end]` of `other` touches or intersects this window.
    ///
    /// Boundaries are inclusive. This covers an `other` that contains this
    /// window, one that begins inside it, and one that ends inside it. A
    /// window lying entirely before or after does not overlap.
    pub fn overlaps(&self, other_start: NaiveDateTime, other_end: NaiveDateTime) -> bool {
        other_start <= self.end && other_end >= self.start
    }
}

/// The event an assignment belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRef {
    /// Event identifier.
    pub id: String,
    /// Event title shown to staff.
    pub title: String,
}

/// Which table an assignment (and its clock record) lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    /// An employee assigned to work an event.
    Server,
    /// A truck and its driver assigned to an event.
    Truck,
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Server => write!(f, "server"),
            AssignmentKind::Truck => write!(f, "truck"),
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(AssignmentKind::Server),
            "truck" => Ok(AssignmentKind::Truck),
            _ => Err(format!("Invalid assignment kind: {}", s)),
        }
    }
}

/// Identifies one assignment row of a given kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentRef {
    /// The assignment ID.
    pub id: String,
    /// The assignment kind.
    pub kind: AssignmentKind,
}

impl AssignmentRef {
    /// Creates a reference to an assignment.
    pub fn new(id: impl Into<String>, kind: AssignmentKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

impl std::fmt::Display for AssignmentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} assignment '{}'", self.kind, self.id)
    }
}

/// Who is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assignee {
    /// An employee working the event.
    Server {
        /// The assigned employee.
        employee_id: String,
    },
    /// A truck with its driver.
    Truck {
        /// The assigned truck.
        truck_id: String,
        /// The employee driving the truck.
        driver_id: String,
    },
}

/// Workflow status of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// Offered but not yet answered.
    Pending,
    /// Accepted by the assignee.
    Accepted,
    /// Declined by the assignee.
    Declined,
}

/// A scheduled piece of work at an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier for the assignment.
    pub id: String,
    /// The event the work belongs to.
    pub event: EventRef,
    /// Who is assigned.
    pub assignee: Assignee,
    /// When the work is scheduled.
    pub window: ShiftWindow,
    /// Workflow status.
    pub status: AssignmentStatus,
    /// Whether the work has been completed.
    #[serde(default)]
    pub is_completed: bool,
}

impl Assignment {
    /// The kind of this assignment.
    pub fn kind(&self) -> AssignmentKind {
        match self.assignee {
            Assignee::Server { .. } => AssignmentKind::Server,
            Assignee::Truck { .. } => AssignmentKind::Truck,
        }
    }

    /// A reference usable for clock-record lookups.
    pub fn reference(&self) -> AssignmentRef {
        AssignmentRef::new(self.id.clone(), self.kind())
    }

    /// The employee doing the work (the server, or the truck's driver).
    pub fn employee_id(&self) -> &str {
        match &self.assignee {
            Assignee::Server { employee_id } => employee_id,
            Assignee::Truck { driver_id, .. } => driver_id,
        }
    }
}

//! Availability checking for a single employee and shift window.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. the employee's own "available" switch,
//! 2. weekly availability for the weekday the shift starts on,
//! 3. approved time off overlapping the shift,
//! 4. other server assignments overlapping the shift widened by the buffer,
//! 5. for drivers, truck assignments overlapping the shift.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SchedulingConfig;
use crate::error::EngineResult;
use crate::models::{Assignment, AssignmentKind, Employee, Role, ShiftWindow, weekday_name};
use crate::store::ScheduleStore;

/// Why an employee cannot take a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// The employee switched their availability off.
    MarkedUnavailable,
    /// The shift starts on a weekday the employee does not work.
    NotAvailableOn(chrono::Weekday),
    /// An accepted time-off request overlaps the shift.
    ApprovedTimeOff,
    /// Another server assignment is too close to the shift.
    ServerConflict {
        /// Title of the conflicting event.
        event_title: String,
    },
    /// The employee is driving a truck during the shift.
    DriverConflict {
        /// Title of the conflicting event.
        event_title: String,
    },
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnavailableReason::MarkedUnavailable => write!(f, "Employee is marked as unavailable"),
            UnavailableReason::NotAvailableOn(day) => {
                write!(f, "Not available on {}", weekday_name(*day))
            }
            UnavailableReason::ApprovedTimeOff => {
                write!(f, "Has approved time off during this period")
            }
            UnavailableReason::ServerConflict { event_title } => {
                write!(f, "Already assigned to {} during this time", event_title)
            }
            UnavailableReason::DriverConflict { event_title } => {
                write!(f, "Already assigned to drive for {} during this time", event_title)
            }
        }
    }
}

/// Outcome of an availability check.
///
/// `reason` is empty when the employee is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// Whether the employee can take the shift.
    pub is_available: bool,
    /// Human-readable reason when not available.
    pub reason: String,
}

impl Availability {
    /// An available result.
    pub fn available() -> Self {
        Self {
            is_available: true,
            reason: String::new(),
        }
    }

    /// An unavailable result.
    pub fn unavailable(reason: &UnavailableReason) -> Self {
        Self {
            is_available: false,
            reason: reason.to_string(),
        }
    }
}

/// Decides whether `employee` can work `window`.
///
/// Assignments belonging to `exclude_event_id` are ignored, so an event
/// being edited does not conflict with itself.
///
/// # Errors
///
/// Returns an error only when the store fails; an ineligible employee is an
/// `Ok` result with `is_available == false`.
pub async fn check_availability(
    store: &dyn ScheduleStore,
    config: &SchedulingConfig,
    employee: &Employee,
    window: &ShiftWindow,
    exclude_event_id: Option<&str>,
) -> EngineResult<Availability> {
    match find_unavailable_reason(store, config, employee, window, exclude_event_id).await? {
        Some(reason) => {
            debug!(
                employee_id = %employee.id,
                employee = %employee.full_name(),
                reason = %reason,
                "Employee unavailable"
            );
            Ok(Availability::unavailable(&reason))
        }
        None => Ok(Availability::available()),
    }
}

/// Runs the checks and returns the first failure, if any.
pub async fn find_unavailable_reason(
    store: &dyn ScheduleStore,
    config: &SchedulingConfig,
    employee: &Employee,
    window: &ShiftWindow,
    exclude_event_id: Option<&str>,
) -> EngineResult<Option<UnavailableReason>> {
    if !employee.is_available {
        return Ok(Some(UnavailableReason::MarkedUnavailable));
    }

    let day = window.weekday();
    if !employee.works_on(day) {
        return Ok(Some(UnavailableReason::NotAvailableOn(day)));
    }

    let time_off = store.time_off_requests(&employee.id).await?;
    if time_off
        .iter()
        .filter(|t| t.is_accepted())
        .any(|t| window.overlaps(t.start, t.end))
    {
        return Ok(Some(UnavailableReason::ApprovedTimeOff));
    }

    let buffered = window.widened(config.assignment_buffer());
    let servers = store
        .assignments_for_employee(&employee.id, AssignmentKind::Server)
        .await?;
    if let Some(conflict) = first_conflict(&servers, &buffered, exclude_event_id) {
        return Ok(Some(UnavailableReason::ServerConflict {
            event_title: conflict.event.title.clone(),
        }));
    }

    if employee.role == Role::Driver {
        let truck_window = if config.apply_buffer_to_truck_assignments {
            buffered
        } else {
            *window
        };
        let trucks = store
            .assignments_for_employee(&employee.id, AssignmentKind::Truck)
            .await?;
        if let Some(conflict) = first_conflict(&trucks, &truck_window, exclude_event_id) {
            return Ok(Some(UnavailableReason::DriverConflict {
                event_title: conflict.event.title.clone(),
            }));
        }
    }

    Ok(None)
}

fn first_conflict<'a>(
    assignments: &'a [Assignment],
    window: &ShiftWindow,
    exclude_event_id: Option<&str>,
) -> Option<&'a Assignment> {
    assignments
        .iter()
        .filter(|a| exclude_event_id != Some(a.event.id.as_str()))
        .find(|a| window.overlaps(a.window.start(), a.window.end()))
}

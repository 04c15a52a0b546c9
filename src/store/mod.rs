//! Collaborator contracts: persistence, wage lookup and geocoding.
//!
//! The engine never owns storage. It reads employees, time-off requests and
//! assignments through [`ScheduleStore`], writes only clock records, and
//! resolves wages and addresses through [`WageLookup`] and [`Geocoder`].
//! [`MemoryStore`] and [`StaticGeocoder`] are in-process implementations for
//! tests and embedders without a database.

mod cache;
mod memory;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::{
    Assignment, AssignmentKind, AssignmentRef, ClockRecord, Coordinates, Employee, Role,
    TimeOffRequest, WageRecord,
};

pub use cache::CachedGeocoder;
pub use memory::{MemoryStore, StaticGeocoder};

/// Read access to scheduling records and write access to clock records.
///
/// "No matching row" is `Ok(None)` or an empty list, never an error.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Looks up one employee.
    async fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>>;

    /// Lists employees whose available flag is set, optionally restricted to a role.
    async fn available_employees(&self, role: Option<Role>) -> EngineResult<Vec<Employee>>;

    /// Lists every time-off request of an employee, whatever its status.
    async fn time_off_requests(&self, employee_id: &str) -> EngineResult<Vec<TimeOffRequest>>;

    /// Lists assignments of `kind` that the employee works (as server or driver).
    async fn assignments_for_employee(
        &self,
        employee_id: &str,
        kind: AssignmentKind,
    ) -> EngineResult<Vec<Assignment>>;

    /// Looks up one assignment.
    async fn assignment(&self, assignment: &AssignmentRef) -> EngineResult<Option<Assignment>>;

    /// Looks up the clock record of an assignment.
    async fn clock_record(&self, assignment: &AssignmentRef) -> EngineResult<Option<ClockRecord>>;

    /// Inserts or replaces the clock record of `record.assignment`.
    async fn save_clock_record(&self, record: ClockRecord) -> EngineResult<ClockRecord>;

    /// Sets `clock_out_at` on an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::ClockRecordNotFound`] when the
    /// assignment has no record.
    async fn set_clock_out(
        &self,
        assignment: &AssignmentRef,
        at: NaiveDateTime,
    ) -> EngineResult<ClockRecord>;
}

/// Resolves an employee's current hourly wage.
#[async_trait]
pub trait WageLookup: Send + Sync {
    /// Returns the most recent wage with `start_date <= as_of`, if any.
    async fn current_wage(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<WageRecord>>;
}

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocodes `address`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Geocoding`] when the address
    /// cannot be resolved.
    async fn geocode(&self, address: &str) -> EngineResult<Coordinates>;
}

/// Normalizes an address for use as a lookup key.
pub(crate) fn address_key(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

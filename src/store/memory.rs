//! In-process implementations of the collaborator traits.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, AssignmentKind, AssignmentRef, ClockRecord, Coordinates, Employee, Role,
    TimeOffRequest, WageRecord, effective_wage,
};

use super::{Geocoder, ScheduleStore, WageLookup, address_key};

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    time_off: Vec<TimeOffRequest>,
    assignments: Vec<Assignment>,
    clock_records: HashMap<AssignmentRef, ClockRecord>,
    wages: Vec<WageRecord>,
}

/// A schedule store held entirely in memory.
///
/// Employees are returned in insertion order.
///
/// # Example
///
/// ```
/// use roster_engine::models::{Employee, Role};
/// use roster_engine::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.add_employee(Employee {
///     id: "emp_001".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Ruiz".to_string(),
///     role: Role::Server,
///     is_available: true,
///     availability: vec![],
///     address: None,
/// });
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&self, employee: Employee) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.employees.retain(|e| e.id != employee.id);
        tables.employees.push(employee);
    }

    /// Adds a time-off request.
    pub fn add_time_off(&self, request: TimeOffRequest) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.time_off.push(request);
    }

    /// Adds or replaces an assignment.
    pub fn add_assignment(&self, assignment: Assignment) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables
            .assignments
            .retain(|a| a.reference() != assignment.reference());
        tables.assignments.push(assignment);
    }

    /// Adds a wage record.
    pub fn add_wage(&self, wage: WageRecord) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.wages.push(wage);
    }

    fn read(&self) -> EngineResult<std::sync::RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| EngineError::storage("memory store lock poisoned"))
    }

    fn write(&self) -> EngineResult<std::sync::RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| EngineError::storage("memory store lock poisoned"))
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
        Ok(self
            .read()?
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned())
    }

    async fn available_employees(&self, role: Option<Role>) -> EngineResult<Vec<Employee>> {
        Ok(self
            .read()?
            .employees
            .iter()
            .filter(|e| e.is_available)
            .filter(|e| role.is_none_or(|r| e.role == r))
            .cloned()
            .collect())
    }

    async fn time_off_requests(&self, employee_id: &str) -> EngineResult<Vec<TimeOffRequest>> {
        Ok(self
            .read()?
            .time_off
            .iter()
            .filter(|t| t.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn assignments_for_employee(
        &self,
        employee_id: &str,
        kind: AssignmentKind,
    ) -> EngineResult<Vec<Assignment>> {
        Ok(self
            .read()?
            .assignments
            .iter()
            .filter(|a| a.kind() == kind && a.employee_id() == employee_id)
            .cloned()
            .collect())
    }

    async fn assignment(&self, assignment: &AssignmentRef) -> EngineResult<Option<Assignment>> {
        Ok(self
            .read()?
            .assignments
            .iter()
            .find(|a| &a.reference() == assignment)
            .cloned())
    }

    async fn clock_record(&self, assignment: &AssignmentRef) -> EngineResult<Option<ClockRecord>> {
        Ok(self.read()?.clock_records.get(assignment).cloned())
    }

    async fn save_clock_record(&self, record: ClockRecord) -> EngineResult<ClockRecord> {
        debug!(assignment = %record.assignment, "Saving clock record");
        self.write()?
            .clock_records
            .insert(record.assignment.clone(), record.clone());
        Ok(record)
    }

    async fn set_clock_out(
        &self,
        assignment: &AssignmentRef,
        at: NaiveDateTime,
    ) -> EngineResult<ClockRecord> {
        let mut tables = self.write()?;
        let record = tables.clock_records.get_mut(assignment).ok_or_else(|| {
            EngineError::ClockRecordNotFound {
                assignment: assignment.clone(),
            }
        })?;
        record.clock_out_at = Some(at);
        Ok(record.clone())
    }
}

#[async_trait]
impl WageLookup for MemoryStore {
    async fn current_wage(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<WageRecord>> {
        let tables = self.read()?;
        let wages: Vec<WageRecord> = tables
            .wages
            .iter()
            .filter(|w| w.employee_id == employee_id)
            .cloned()
            .collect();
        Ok(effective_wage(&wages, as_of).cloned())
    }
}

/// A geocoder backed by a fixed address table.
///
/// Lookups ignore case and repeated whitespace. Unknown addresses fail.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    known: HashMap<String, Coordinates>,
    lookups: AtomicUsize,
}

impl StaticGeocoder {
    /// Creates a geocoder that knows no addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an address.
    pub fn with_address(mut self, address: &str, coordinates: Coordinates) -> Self {
        self.known.insert(address_key(address), coordinates);
        self
    }

    /// Number of geocode calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> EngineResult<Coordinates> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.known
            .get(&address_key(address))
            .copied()
            .ok_or_else(|| EngineError::Geocoding {
                address: address.to_string(),
                message: "no results".to_string(),
            })
    }
}

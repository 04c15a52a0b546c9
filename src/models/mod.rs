//! Core data models for the Roster Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod candidate;
mod clock_record;
mod employee;
mod time_off;
mod wage;

pub use assignment::{
    Assignee, Assignment, AssignmentKind, AssignmentRef, AssignmentStatus, EventRef, ShiftWindow,
};
pub use candidate::Candidate;
pub use clock_record::ClockRecord;
pub use employee::{Address, Coordinates, Employee, EmployeeLocation, Role, weekday_name};
pub use time_off::{TimeOffRequest, TimeOffStatus};
pub use wage::{WageRecord, effective_wage};

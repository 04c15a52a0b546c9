//! Error types for the Roster Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while checking availability,
//! searching candidates, or recording clock events.
//!
//! An employee being ineligible for a shift is not an error; it is reported
//! through [`crate::engine::Availability`].

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::AssignmentRef;

/// The main error type for the Roster Engine.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A shift window did not end strictly after it started.
    #[error("Invalid shift window: end {end} is not after start {start}")]
    InvalidShiftWindow {
        /// The requested start of the window.
        start: NaiveDateTime,
        /// The requested end of the window.
        end: NaiveDateTime,
    },

    /// The requested employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The ID that was looked up.
        employee_id: String,
    },

    /// The requested assignment does not exist.
    #[error("Assignment not found: {assignment}")]
    AssignmentNotFound {
        /// The assignment that was looked up.
        assignment: AssignmentRef,
    },

    /// A check-out was attempted for an assignment with no clock record.
    #[error("No clock record for {assignment}")]
    ClockRecordNotFound {
        /// The assignment whose record was missing.
        assignment: AssignmentRef,
    },

    /// The persistence collaborator failed a read or write.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },

    /// The geocoding collaborator could not resolve an address.
    #[error("Failed to geocode '{address}': {message}")]
    Geocoding {
        /// The address that could not be resolved.
        address: String,
        /// A description of the failure.
        message: String,
    },

    /// The wage-lookup collaborator failed.
    #[error("Wage lookup failed for employee '{employee_id}': {message}")]
    WageLookup {
        /// The employee whose wage was requested.
        employee_id: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::Storage`] from any displayable message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssignmentKind;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_shift_window_displays_bounds() {
        let at = NaiveDateTime::parse_from_str("2026-03-02 09:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        let error = EngineError::InvalidShiftWindow { start: at, end: at };
        assert_eq!(
            error.to_string(),
            "Invalid shift window: end 2026-03-02 09:00:00 is not after start 2026-03-02 09:00:00"
        );
    }

    #[test]
    fn test_clock_record_not_found_names_assignment() {
        let error = EngineError::ClockRecordNotFound {
            assignment: AssignmentRef::new("asg_7", AssignmentKind::Truck),
        };
        assert_eq!(error.to_string(), "No clock record for truck assignment 'asg_7'");
    }

    #[test]
    fn test_assignment_not_found_names_assignment() {
        let error = EngineError::AssignmentNotFound {
            assignment: AssignmentRef::new("sa_3", AssignmentKind::Server),
        };
        assert_eq!(error.to_string(), "Assignment not found: server assignment 'sa_3'");
    }

    #[test]
    fn test_storage_helper() {
        let error = EngineError::storage("connection reset");
        assert_eq!(error.to_string(), "Storage error: connection reset");
    }

    #[test]
    fn test_geocoding_displays_address() {
        let error = EngineError::Geocoding {
            address: "1 Main St".to_string(),
            message: "no results".to_string(),
        };
        assert_eq!(error.to_string(), "Failed to geocode '1 Main St': no results");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_storage_error() -> EngineResult<()> {
            Err(EngineError::storage("down"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_storage_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

//! Wage record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An hourly wage that takes effect on `start_date`.
///
/// An employee's current wage is the record with the latest `start_date`
/// that is on or before today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageRecord {
    /// The employee the wage applies to.
    pub employee_id: String,
    /// Hourly rate.
    pub hourly_rate: Decimal,
    /// First day the rate applies.
    pub start_date: NaiveDate,
}

/// Picks the wage in effect on `as_of` from an unordered list.
///
/// # Examples
///
/// ```
/// use roster_engine::models::{WageRecord, effective_wage};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let wages = vec![
///     WageRecord {
///         employee_id: "emp_001".to_string(),
///         hourly_rate: Decimal::new(1800, 2),
///         start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     },
///     WageRecord {
///         employee_id: "emp_001".to_string(),
///         hourly_rate: Decimal::new(2000, 2),
///         start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     },
/// ];
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(effective_wage(&wages, as_of).unwrap().hourly_rate, Decimal::new(1800, 2));
/// ```
pub fn effective_wage(wages: &[WageRecord], as_of: NaiveDate) -> Option<&WageRecord> {
    wages
        .iter()
        .filter(|w| w.start_date <= as_of)
        .max_by_key(|w| w.start_date)
}

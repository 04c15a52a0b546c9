//! Candidate ranking entry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// An eligible employee annotated for ranking.
///
/// Candidates are produced during a search and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The eligible employee.
    #[serde(flatten)]
    pub employee: Employee,
    /// Distance to the event in kilometres; `None` when either side has no coordinates.
    pub distance_km: Option<f64>,
    /// Current hourly wage; zero when unknown.
    pub current_wage: Decimal,
}

//! Check-in and check-out writes.

use std::sync::Arc;

use tracing::info;

use crate::error::EngineResult;
use crate::models::{AssignmentRef, ClockRecord};
use crate::store::ScheduleStore;
use crate::time::Clock;

/// Records clock events against assignments.
///
/// Check-in is idempotent: a retried or double-clicked check-in returns the
/// record written the first time. Check-out does not verify a prior check-in;
/// the store reports a missing record as
/// [`EngineError::ClockRecordNotFound`](crate::error::EngineError::ClockRecordNotFound).
#[derive(Clone)]
pub struct ClockEventRecorder {
    store: Arc<dyn ScheduleStore>,
    clock: Arc<dyn Clock>,
}

impl ClockEventRecorder {
    /// Creates a recorder writing through `store` with timestamps from `clock`.
    pub fn new(store: Arc<dyn ScheduleStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Checks the assignee in, or returns the existing check-in unchanged.
    pub async fn check_in(&self, assignment: &AssignmentRef) -> EngineResult<ClockRecord> {
        if let Some(existing) = self.store.clock_record(assignment).await?
            && existing.is_checked_in()
        {
            info!(assignment = %assignment, "Already checked in");
            return Ok(existing);
        }

        let now = self.clock.now();
        let record = self
            .store
            .save_clock_record(ClockRecord::checked_in(assignment.clone(), now))
            .await?;
        info!(assignment = %assignment, at = %now, "Checked in");
        Ok(record)
    }

    /// Checks the assignee out at the current time.
    pub async fn check_out(&self, assignment: &AssignmentRef) -> EngineResult<ClockRecord> {
        let now = self.clock.now();
        let record = self.store.set_clock_out(assignment, now).await?;
        info!(assignment = %assignment, at = %now, "Checked out");
        Ok(record)
    }
}

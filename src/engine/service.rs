//! The caller-facing entry point that wires collaborators to the engine.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentRef, Candidate, ClockRecord, ShiftWindow};
use crate::store::{CachedGeocoder, Geocoder, ScheduleStore, WageLookup};
use crate::time::Clock;

use super::availability::{Availability, check_availability};
use super::candidates::{CandidateQuery, SearchContext, find_candidates};
use super::clock_events::ClockEventRecorder;
use super::status::{ShiftTimes, StatusReport, evaluate};

/// Availability checks, candidate search, shift status and clock events
/// over one set of collaborators.
///
/// Geocoding goes through a [`CachedGeocoder`] whose TTL comes from
/// `config.geocoding`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use roster_engine::config::EngineConfig;
/// use roster_engine::engine::RosterEngine;
/// use roster_engine::store::{MemoryStore, StaticGeocoder};
/// use roster_engine::time::SystemClock;
///
/// let store = Arc::new(MemoryStore::new());
/// let engine = RosterEngine::new(
///     store.clone(),
///     store,
///     StaticGeocoder::new(),
///     Arc::new(SystemClock),
///     EngineConfig::default(),
/// );
/// assert_eq!(engine.config().ranking.equal_distance_threshold_km, 5.0);
/// ```
#[derive(Clone)]
pub struct RosterEngine {
    store: Arc<dyn ScheduleStore>,
    wages: Arc<dyn WageLookup>,
    geocoder: Arc<dyn Geocoder>,
    clock: Arc<dyn Clock>,
    config: Arc<EngineConfig>,
    recorder: ClockEventRecorder,
}

impl RosterEngine {
    /// Creates an engine over the given collaborators.
    pub fn new<G>(
        store: Arc<dyn ScheduleStore>,
        wages: Arc<dyn WageLookup>,
        geocoder: G,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self
    where
        G: Geocoder + 'static,
    {
        let geocoder = Arc::new(CachedGeocoder::new(
            geocoder,
            clock.clone(),
            config.geocoding.cache_ttl(),
        ));
        let recorder = ClockEventRecorder::new(store.clone(), clock.clone());
        Self {
            store,
            wages,
            geocoder,
            clock,
            config: Arc::new(config),
            recorder,
        }
    }

    /// The configuration in effect.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Decides whether an employee can take `window`.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] for an unknown ID; store failures
    /// propagate.
    pub async fn check_availability(
        &self,
        employee_id: &str,
        window: &ShiftWindow,
        exclude_event_id: Option<&str>,
    ) -> EngineResult<Availability> {
        let employee = self
            .store
            .employee(employee_id)
            .await?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })?;

        check_availability(
            self.store.as_ref(),
            &self.config.scheduling,
            &employee,
            window,
            exclude_event_id,
        )
        .await
    }

    /// Finds and ranks employees who can work the queried shift.
    pub async fn find_candidates(&self, query: &CandidateQuery) -> EngineResult<Vec<Candidate>> {
        let ctx = SearchContext {
            store: self.store.as_ref(),
            wages: self.wages.as_ref(),
            geocoder: self.geocoder.as_ref(),
            scheduling: &self.config.scheduling,
            ranking: &self.config.ranking,
            today: self.clock.now().date(),
        };
        find_candidates(ctx, query).await
    }

    /// Evaluates a shift from explicit timestamps, at `now` or the clock's time.
    pub fn shift_status(&self, shift: &ShiftTimes, now: Option<NaiveDateTime>) -> StatusReport {
        let now = now.unwrap_or_else(|| self.clock.now());
        evaluate(&self.config.check_in, shift, now)
    }

    /// Evaluates a stored assignment against its clock record at the current time.
    ///
    /// # Errors
    ///
    /// [`EngineError::AssignmentNotFound`] for an unknown assignment.
    pub async fn assignment_status(&self, assignment: &AssignmentRef) -> EngineResult<StatusReport> {
        let scheduled = self.store.assignment(assignment).await?.ok_or_else(|| {
            EngineError::AssignmentNotFound {
                assignment: assignment.clone(),
            }
        })?;
        let record = self.store.clock_record(assignment).await?;
        let shift = ShiftTimes::from_record(scheduled.window, record.as_ref());

        let report = self.shift_status(&shift, None);
        debug!(assignment = %assignment, status = %report.status, "Evaluated assignment status");
        Ok(report)
    }

    /// Checks the assignee in; repeated calls return the first record.
    pub async fn check_in(&self, assignment: &AssignmentRef) -> EngineResult<ClockRecord> {
        self.recorder.check_in(assignment).await
    }

    /// Checks the assignee out at the current time.
    pub async fn check_out(&self, assignment: &AssignmentRef) -> EngineResult<ClockRecord> {
        self.recorder.check_out(assignment).await
    }
}

//! Eligible-candidate search.
//!
//! Loads the available pool for a role, drops anyone who does not work the
//! shift's weekday, runs the full availability check for the rest
//! concurrently, then annotates survivors with distance and wage and ranks
//! them. A failure tied to one employee (their availability lookups, their
//! address, their wage) never aborts the search for everyone else.

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{RankingConfig, SchedulingConfig};
use crate::error::EngineResult;
use crate::models::{Candidate, Coordinates, Employee, EmployeeLocation, Role, ShiftWindow};
use crate::store::{Geocoder, ScheduleStore, WageLookup};

use super::availability::check_availability;
use super::distance::distance_km;
use super::ranking::rank_candidates;

/// What to search candidates for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateQuery {
    /// Restrict to a role; `None` searches every role.
    #[serde(default)]
    pub role: Option<Role>,
    /// The shift to fill.
    pub window: ShiftWindow,
    /// Event address, geocoded when no coordinates are given.
    #[serde(default)]
    pub event_address: Option<String>,
    /// Event coordinates, if already known.
    #[serde(default)]
    pub event_coordinates: Option<Coordinates>,
    /// Assignments of this event are not treated as conflicts.
    #[serde(default)]
    pub exclude_event_id: Option<String>,
}

/// Collaborators and settings a search runs against.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    /// Employee and assignment records.
    pub store: &'a dyn ScheduleStore,
    /// Current wages.
    pub wages: &'a dyn WageLookup,
    /// Address resolution.
    pub geocoder: &'a dyn Geocoder,
    /// Conflict settings.
    pub scheduling: &'a SchedulingConfig,
    /// Ranking settings.
    pub ranking: &'a RankingConfig,
    /// The date wages are looked up for.
    pub today: NaiveDate,
}

/// Finds employees who can work `query.window`, best candidates first.
///
/// When the event cannot be located (no coordinates, no address, or the
/// address fails to geocode) the eligible employees are returned unranked,
/// in pool order, with no distances.
///
/// # Errors
///
/// Returns an error if the employee pool itself cannot be loaded.
pub async fn find_candidates(
    ctx: SearchContext<'_>,
    query: &CandidateQuery,
) -> EngineResult<Vec<Candidate>> {
    let pool = ctx.store.available_employees(query.role).await?;
    let pool_size = pool.len();

    let day = query.window.weekday();
    let prefiltered: Vec<Employee> = pool.into_iter().filter(|e| e.works_on(day)).collect();

    let checks = prefiltered.into_iter().map(|employee| async move {
        let result = check_availability(
            ctx.store,
            ctx.scheduling,
            &employee,
            &query.window,
            query.exclude_event_id.as_deref(),
        )
        .await;
        (employee, result)
    });

    let eligible: Vec<Employee> = join_all(checks)
        .await
        .into_iter()
        .filter_map(|(employee, result)| match result {
            Ok(availability) if availability.is_available => Some(employee),
            Ok(_) => None,
            Err(err) => {
                warn!(
                    employee_id = %employee.id,
                    error = %err,
                    "Availability check failed; treating employee as ineligible"
                );
                None
            }
        })
        .collect();

    let event_coordinates = resolve_event_coordinates(ctx.geocoder, query).await;

    info!(
        role = ?query.role,
        pool_size,
        eligible = eligible.len(),
        located_event = event_coordinates.is_some(),
        "Candidate search completed availability checks"
    );

    let candidates = join_all(eligible.into_iter().map(|employee| async move {
        let distance_km = match event_coordinates {
            Some(event) => employee_distance(ctx.geocoder, &employee, event).await,
            None => None,
        };
        let current_wage = current_wage(ctx.wages, &employee.id, ctx.today).await;
        Candidate {
            employee,
            distance_km,
            current_wage,
        }
    }))
    .await;

    if event_coordinates.is_none() {
        return Ok(candidates);
    }

    Ok(rank_candidates(
        candidates,
        ctx.ranking.equal_distance_threshold_km,
    ))
}

async fn resolve_event_coordinates(
    geocoder: &dyn Geocoder,
    query: &CandidateQuery,
) -> Option<Coordinates> {
    if let Some(coordinates) = query.event_coordinates {
        return Some(coordinates);
    }

    let address = query
        .event_address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())?;

    match geocoder.geocode(address).await {
        Ok(coordinates) => Some(coordinates),
        Err(err) => {
            warn!(address = %address, error = %err, "Event geocoding failed; results will be unranked");
            None
        }
    }
}

async fn employee_distance(
    geocoder: &dyn Geocoder,
    employee: &Employee,
    event: Coordinates,
) -> Option<f64> {
    match employee.location() {
        EmployeeLocation::Located(home) => Some(distance_km(home, event)),
        EmployeeLocation::AddressOnly(address) => match geocoder.geocode(&address).await {
            Ok(home) => Some(distance_km(home, event)),
            Err(err) => {
                debug!(employee_id = %employee.id, error = %err, "Employee address not geocoded");
                None
            }
        },
        EmployeeLocation::Unknown => None,
    }
}

async fn current_wage(wages: &dyn WageLookup, employee_id: &str, today: NaiveDate) -> Decimal {
    match wages.current_wage(employee_id, today).await {
        Ok(Some(wage)) => wage.hourly_rate,
        Ok(None) => Decimal::ZERO,
        Err(err) => {
            warn!(employee_id = %employee_id, error = %err, "Wage lookup failed; ranking with zero wage");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        Address, Assignee, Assignment, AssignmentKind, AssignmentRef, AssignmentStatus,
        ClockRecord, EventRef, TimeOffRequest, WageRecord,
    };
    use crate::store::{MemoryStore, StaticGeocoder};
    use async_trait::async_trait;
    use chrono::{NaiveDateTime, Weekday};

    const EVENT: Coordinates = Coordinates {
        latitude: 30.2672,
        longitude: -97.7431,
    };

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
    }

    /// Saturday 2026-03-07, 11:00-19:00
    fn saturday_shift() -> ShiftWindow {
        ShiftWindow::new(
            make_datetime("2026-03-07 11:00:00"),
            make_datetime("2026-03-07 19:00:00"),
        )
        .unwrap()
    }

    /// Roughly `km` kilometres north of the event.
    fn north_of_event(km: f64) -> Coordinates {
        Coordinates::new(EVENT.latitude + km / 111.195, EVENT.longitude)
    }

    fn address(coordinates: Option<Coordinates>, street: &str) -> Address {
        Address {
            street: street.to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "78701".to_string(),
            coordinates,
        }
    }

    fn employee(id: &str, role: Role, address: Option<Address>) -> Employee {
        Employee {
            id: id.to_string(),
            first_name: id.to_string(),
            last_name: "Test".to_string(),
            role,
            is_available: true,
            availability: vec![Weekday::Fri, Weekday::Sat],
            address,
        }
    }

    fn wage(store: &MemoryStore, id: &str, rate: i64) {
        store.add_wage(WageRecord {
            employee_id: id.to_string(),
            hourly_rate: Decimal::new(rate, 0),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        });
    }

    fn query(role: Option<Role>) -> CandidateQuery {
        CandidateQuery {
            role,
            window: saturday_shift(),
            event_address: None,
            event_coordinates: Some(EVENT),
            exclude_event_id: None,
        }
    }

    async fn search(
        store: &dyn ScheduleStore,
        wages: &dyn WageLookup,
        geocoder: &dyn Geocoder,
        query: &CandidateQuery,
    ) -> Vec<Candidate> {
        let scheduling = SchedulingConfig::default();
        let ranking = RankingConfig::default();
        let ctx = SearchContext {
            store,
            wages,
            geocoder,
            scheduling: &scheduling,
            ranking: &ranking,
            today: today(),
        };
        find_candidates(ctx, query).await.unwrap()
    }

    fn ids(candidates: &[Candidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.employee.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_ranks_by_distance_then_wage() {
        let store = MemoryStore::new();
        store.add_employee(employee("far_cheap", Role::Server, Some(address(Some(north_of_event(20.0)), "a"))));
        store.add_employee(employee("near_pricey", Role::Server, Some(address(Some(north_of_event(2.0)), "b"))));
        store.add_employee(employee("near_cheap", Role::Server, Some(address(Some(north_of_event(4.0)), "c"))));
        store.add_employee(employee("nowhere", Role::Server, None));
        wage(&store, "far_cheap", 12);
        wage(&store, "near_pricey", 25);
        wage(&store, "near_cheap", 15);
        wage(&store, "nowhere", 10);

        let geocoder = StaticGeocoder::new();
        let result = search(&store, &store, &geocoder, &query(Some(Role::Server))).await;

        assert_eq!(ids(&result), vec!["near_cheap", "near_pricey", "far_cheap", "nowhere"]);
        assert_eq!(result[0].current_wage, Decimal::new(15, 0));
        assert!(result[3].distance_km.is_none());
    }

    #[tokio::test]
    async fn test_role_filter_and_weekday_prefilter() {
        let store = MemoryStore::new();
        store.add_employee(employee("server", Role::Server, None));
        store.add_employee(employee("driver", Role::Driver, None));
        let mut weekday_only = employee("weekday_only", Role::Server, None);
        weekday_only.availability = vec![Weekday::Mon];
        store.add_employee(weekday_only);

        let geocoder = StaticGeocoder::new();
        let result = search(&store, &store, &geocoder, &query(Some(Role::Server))).await;
        assert_eq!(ids(&result), vec!["server"]);

        let everyone = search(&store, &store, &geocoder, &query(None)).await;
        assert_eq!(everyone.len(), 2);
    }

    #[tokio::test]
    async fn test_conflicting_employee_dropped() {
        let store = MemoryStore::new();
        store.add_employee(employee("busy", Role::Server, None));
        store.add_employee(employee("free", Role::Server, None));
        store.add_assignment(Assignment {
            id: "sa_1".to_string(),
            event: EventRef {
                id: "evt_other".to_string(),
                title: "Brewery Night".to_string(),
            },
            assignee: Assignee::Server {
                employee_id: "busy".to_string(),
            },
            window: ShiftWindow::new(
                make_datetime("2026-03-07 17:00:00"),
                make_datetime("2026-03-07 22:00:00"),
            )
            .unwrap(),
            status: AssignmentStatus::Accepted,
            is_completed: false,
        });

        let geocoder = StaticGeocoder::new();
        let result = search(&store, &store, &geocoder, &query(Some(Role::Server))).await;
        assert_eq!(ids(&result), vec!["free"]);

        let mut editing = query(Some(Role::Server));
        editing.exclude_event_id = Some("evt_other".to_string());
        let result = search(&store, &store, &geocoder, &editing).await;
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_identical_coordinates_rank_as_zero() {
        let store = MemoryStore::new();
        store.add_employee(employee("onsite", Role::Server, Some(address(Some(EVENT), "a"))));
        let geocoder = StaticGeocoder::new();
        let result = search(&store, &store, &geocoder, &query(None)).await;
        assert_eq!(result[0].distance_km, Some(0.0));
    }

    #[tokio::test]
    async fn test_event_geocoded_from_address() {
        let store = MemoryStore::new();
        store.add_employee(employee("a", Role::Server, Some(address(Some(north_of_event(10.0)), "a"))));
        store.add_employee(employee("b", Role::Server, Some(address(Some(north_of_event(1.0)), "b"))));
        let geocoder = StaticGeocoder::new().with_address("500 E Cesar Chavez St", EVENT);

        let mut q = query(None);
        q.event_coordinates = None;
        q.event_address = Some("500 E Cesar Chavez St".to_string());
        let result = search(&store, &store, &geocoder, &q).await;
        assert_eq!(ids(&result), vec!["b", "a"]);
        assert!(result.iter().all(|c| c.distance_km.is_some()));
    }

    #[tokio::test]
    async fn test_unlocatable_event_returns_unranked() {
        let store = MemoryStore::new();
        store.add_employee(employee("pricey", Role::Server, Some(address(Some(north_of_event(1.0)), "a"))));
        store.add_employee(employee("cheap", Role::Server, None));
        wage(&store, "pricey", 30);
        wage(&store, "cheap", 10);
        let geocoder = StaticGeocoder::new();

        let mut q = query(None);
        q.event_coordinates = None;
        q.event_address = Some("Unknown Field".to_string());
        let result = search(&store, &store, &geocoder, &q).await;

        assert_eq!(ids(&result), vec!["pricey", "cheap"]);
        assert!(result.iter().all(|c| c.distance_km.is_none()));

        q.event_address = None;
        let result = search(&store, &store, &geocoder, &q).await;
        assert_eq!(ids(&result), vec!["pricey", "cheap"]);
    }

    #[tokio::test]
    async fn test_employee_address_geocoded_when_no_coordinates() {
        let store = MemoryStore::new();
        store.add_employee(employee("addr", Role::Server, Some(address(None, "12 Oak St"))));
        let geocoder = StaticGeocoder::new()
            .with_address("12 Oak St, Austin, TX 78701", north_of_event(3.0));
        let result = search(&store, &store, &geocoder, &query(None)).await;
        let distance = result[0].distance_km.unwrap();
        assert!((distance - 3.0).abs() < 0.05);
    }

    struct FailingWages;

    #[async_trait]
    impl WageLookup for FailingWages {
        async fn current_wage(
            &self,
            employee_id: &str,
            _as_of: NaiveDate,
        ) -> EngineResult<Option<WageRecord>> {
            Err(EngineError::WageLookup {
                employee_id: employee_id.to_string(),
                message: "timeout".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_wage_failure_counts_as_zero() {
        let store = MemoryStore::new();
        store.add_employee(employee("a", Role::Server, None));
        let geocoder = StaticGeocoder::new();
        let result = search(&store, &FailingWages, &geocoder, &query(None)).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].current_wage, Decimal::ZERO);
    }

    /// Delegates to a memory store but fails time-off lookups for one employee.
    struct FlakyStore {
        inner: MemoryStore,
        broken_employee: String,
    }

    #[async_trait]
    impl ScheduleStore for FlakyStore {
        async fn employee(&self, employee_id: &str) -> EngineResult<Option<Employee>> {
            self.inner.employee(employee_id).await
        }

        async fn available_employees(&self, role: Option<Role>) -> EngineResult<Vec<Employee>> {
            self.inner.available_employees(role).await
        }

        async fn time_off_requests(&self, employee_id: &str) -> EngineResult<Vec<TimeOffRequest>> {
            if employee_id == self.broken_employee {
                return Err(EngineError::storage("row decode failed"));
            }
            self.inner.time_off_requests(employee_id).await
        }

        async fn assignments_for_employee(
            &self,
            employee_id: &str,
            kind: AssignmentKind,
        ) -> EngineResult<Vec<Assignment>> {
            self.inner.assignments_for_employee(employee_id, kind).await
        }

        async fn assignment(&self, assignment: &AssignmentRef) -> EngineResult<Option<Assignment>> {
            self.inner.assignment(assignment).await
        }

        async fn clock_record(
            &self,
            assignment: &AssignmentRef,
        ) -> EngineResult<Option<ClockRecord>> {
            self.inner.clock_record(assignment).await
        }

        async fn save_clock_record(&self, record: ClockRecord) -> EngineResult<ClockRecord> {
            self.inner.save_clock_record(record).await
        }

        async fn set_clock_out(
            &self,
            assignment: &AssignmentRef,
            at: NaiveDateTime,
        ) -> EngineResult<ClockRecord> {
            self.inner.set_clock_out(assignment, at).await
        }
    }

    #[tokio::test]
    async fn test_failed_check_marks_only_that_employee_ineligible() {
        let inner = MemoryStore::new();
        inner.add_employee(employee("broken", Role::Server, None));
        inner.add_employee(employee("fine", Role::Server, None));
        let store = FlakyStore {
            inner,
            broken_employee: "broken".to_string(),
        };
        let geocoder = StaticGeocoder::new();
        let result = search(&store, &store.inner, &geocoder, &query(None)).await;
        assert_eq!(ids(&result), vec!["fine"]);
    }
}

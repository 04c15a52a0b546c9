//! Candidate ordering by proximity, with wage as the tie-break.

use std::cmp::Ordering;

use crate::models::Candidate;

/// Default distance difference (km) within which two candidates count as equally close.
pub const DEFAULT_EQUAL_DISTANCE_THRESHOLD_KM: f64 = 5.0;

/// Compares two candidates for ranking.
///
/// 1. Candidates without a distance go after every candidate with one.
/// 2. Two candidates without a distance: lower wage first.
/// 3. Two candidates with a distance: if the distances differ by at most
///    `threshold_km` they are equally close and the lower wage goes first
///    (the nearer one if wages match); otherwise the nearer one goes first.
pub fn compare_candidates(a: &Candidate, b: &Candidate, threshold_km: f64) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (None, None) => a.current_wage.cmp(&b.current_wage),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(da), Some(db)) => {
            if (da - db).abs() <= threshold_km {
                a.current_wage
                    .cmp(&b.current_wage)
                    .then_with(|| da.total_cmp(&db))
            } else {
                da.total_cmp(&db)
            }
        }
    }
}

/// Orders candidates best-first using [`compare_candidates`].
///
/// The "equally close" rule is not transitive (0 km ~ 4 km ~ 8 km, yet
/// 0 km < 8 km), which `slice::sort_by` is allowed to panic on. A stable
/// insertion sort gives a deterministic result for any input order.
///
/// # Example
///
/// ```
/// use roster_engine::engine::rank_candidates;
/// use roster_engine::models::{Candidate, Employee, Role};
/// use rust_decimal::Decimal;
///
/// fn candidate(id: &str, distance_km: Option<f64>, wage: i64) -> Candidate {
///     Candidate {
///         employee: Employee {
///             id: id.to_string(),
///             first_name: id.to_string(),
///             last_name: "Test".to_string(),
///             role: Role::Server,
///             is_available: true,
///             availability: vec![],
///             address: None,
///         },
///         distance_km,
///         current_wage: Decimal::new(wage, 0),
///     }
/// }
///
/// let ranked = rank_candidates(
///     vec![candidate("far", Some(20.0), 15), candidate("near", Some(2.0), 25)],
///     5.0,
/// );
/// assert_eq!(ranked[0].employee.id, "near");
/// ```
pub fn rank_candidates(candidates: Vec<Candidate>, threshold_km: f64) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let mut pos = ranked.len();
        while pos > 0
            && compare_candidates(&ranked[pos - 1], &candidate, threshold_km)
                == Ordering::Greater
        {
            pos -= 1;
        }
        ranked.insert(pos, candidate);
    }
    ranked
}

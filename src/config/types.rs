//! Configuration types for the Roster Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section has a
//! default matching the values shipped in `config/engine.yaml`, so a file
//! only needs to list what it overrides.

use chrono::Duration;
use serde::Deserialize;

/// Assignment-conflict settings used by the availability checker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Minutes added on both sides of a proposed shift before testing it
    /// against the employee's other server assignments.
    pub assignment_buffer_minutes: u32,
    /// Whether the buffer also applies to truck (driver) assignments.
    pub apply_buffer_to_truck_assignments: bool,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            assignment_buffer_minutes: 60,
            apply_buffer_to_truck_assignments: false,
        }
    }
}

impl SchedulingConfig {
    /// The assignment buffer as a duration.
    pub fn assignment_buffer(&self) -> Duration {
        Duration::minutes(i64::from(self.assignment_buffer_minutes))
    }
}

/// Candidate ranking settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Candidates whose distances differ by at most this many kilometres are
    /// treated as equally close and ordered by wage.
    pub equal_distance_threshold_km: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            equal_distance_threshold_km: 5.0,
        }
    }
}

/// Boundaries of the check-in window and the overtime grace period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckInPolicy {
    /// How long before the shift start check-in opens.
    pub opens_minutes_before_start: u32,
    /// How long after the shift start check-in stays open.
    pub closes_minutes_after_start: u32,
    /// How long after the shift end an open shift counts as overtime.
    pub overtime_grace_minutes: u32,
}

impl Default for CheckInPolicy {
    fn default() -> Self {
        Self {
            opens_minutes_before_start: 240,
            closes_minutes_after_start: 60,
            overtime_grace_minutes: 240,
        }
    }
}

impl CheckInPolicy {
    /// Duration before start at which check-in opens.
    pub fn opens_before(&self) -> Duration {
        Duration::minutes(i64::from(self.opens_minutes_before_start))
    }

    /// Duration after start at which check-in closes.
    pub fn closes_after(&self) -> Duration {
        Duration::minutes(i64::from(self.closes_minutes_after_start))
    }

    /// Duration after end at which overtime expires.
    pub fn overtime_grace(&self) -> Duration {
        Duration::minutes(i64::from(self.overtime_grace_minutes))
    }
}

/// Longest accepted geocode cache TTL (ten years).
pub const MAX_CACHE_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Geocoding cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// How long a resolved address stays cached.
    pub cache_ttl_seconds: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: 3600,
        }
    }
}

impl GeocodingConfig {
    /// The cache TTL as a duration.
    pub fn cache_ttl(&self) -> Duration {
        let secs = i64::try_from(self.cache_ttl_seconds)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Duration::seconds(secs)
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Assignment-conflict settings.
    pub scheduling: SchedulingConfig,
    /// Candidate ranking settings.
    pub ranking: RankingConfig,
    /// Check-in window and overtime settings.
    pub check_in: CheckInPolicy,
    /// Geocoding cache settings.
    pub geocoding: GeocodingConfig,
}

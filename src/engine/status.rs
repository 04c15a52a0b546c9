//! Shift lifecycle state derived from the clock and recorded clock events.
//!
//! Everything here is a pure function of its inputs. Callers poll it as
//! wall-clock time advances; nothing is cached between calls.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::CheckInPolicy;
use crate::models::{ClockRecord, ShiftWindow};

/// Where a shift is in its check-in/check-out lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Check-in window has not opened yet.
    Before,
    /// Inside the check-in window, not checked in.
    Ready,
    /// Checked in, shift not over.
    CheckedIn,
    /// Checked in and still working past the scheduled end.
    Overtime,
    /// Checked in but never checked out within the overtime grace period.
    OvertimeExpired,
    /// Checked out. Terminal.
    CheckedOut,
    /// Check-in window closed without a check-in.
    Missed,
}

impl ShiftStatus {
    /// True when a check-in should be offered.
    pub fn can_check_in(self) -> bool {
        matches!(self, ShiftStatus::Ready)
    }

    /// True when a check-out should be offered.
    pub fn can_check_out(self) -> bool {
        matches!(self, ShiftStatus::CheckedIn | ShiftStatus::Overtime)
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShiftStatus::Before => "before",
            ShiftStatus::Ready => "ready",
            ShiftStatus::CheckedIn => "checked_in",
            ShiftStatus::Overtime => "overtime",
            ShiftStatus::OvertimeExpired => "overtime_expired",
            ShiftStatus::CheckedOut => "checked_out",
            ShiftStatus::Missed => "missed",
        };
        write!(f, "{}", s)
    }
}

/// A scheduled window plus whatever clock events were recorded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimes {
    /// Scheduled start and end.
    pub window: ShiftWindow,
    /// When the employee checked in, if they did.
    #[serde(default)]
    pub clock_in_at: Option<NaiveDateTime>,
    /// When the employee checked out, if they did.
    #[serde(default)]
    pub clock_out_at: Option<NaiveDateTime>,
}

impl ShiftTimes {
    /// A shift with no clock events.
    pub fn scheduled(window: ShiftWindow) -> Self {
        Self {
            window,
            clock_in_at: None,
            clock_out_at: None,
        }
    }

    /// A shift with the timestamps of `record`, if there is one.
    pub fn from_record(window: ShiftWindow, record: Option<&ClockRecord>) -> Self {
        Self {
            window,
            clock_in_at: record.and_then(|r| r.clock_in_at),
            clock_out_at: record.and_then(|r| r.clock_out_at),
        }
    }
}

/// Status, display text and allowed actions for one shift at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Lifecycle state.
    pub status: ShiftStatus,
    /// Human-readable summary.
    pub message: String,
    /// Whether check-in is currently allowed.
    pub can_check_in: bool,
    /// Whether check-out is currently allowed.
    pub can_check_out: bool,
}

/// Derives the lifecycle state of `shift` at `now`.
///
/// Rules are tried in order and the first match wins:
///
/// 1. clock-out recorded: `CheckedOut`
/// 2. clocked in and now past end + grace: `OvertimeExpired`
/// 3. clocked in and now past end: `Overtime`
/// 4. clocked in: `CheckedIn`
/// 5. before the check-in window opens: `Before`
/// 6. inside the window (both ends inclusive): `Ready`
/// 7. otherwise: `Missed`
pub fn compute_status(policy: &CheckInPolicy, shift: &ShiftTimes, now: NaiveDateTime) -> ShiftStatus {
    let start = shift.window.start();
    let end = shift.window.end();

    if shift.clock_out_at.is_some() {
        return ShiftStatus::CheckedOut;
    }

    if shift.clock_in_at.is_some() {
        if now > end + policy.overtime_grace() {
            return ShiftStatus::OvertimeExpired;
        }
        if now > end {
            return ShiftStatus::Overtime;
        }
        return ShiftStatus::CheckedIn;
    }

    let opens = start - policy.opens_before();
    let closes = start + policy.closes_after();
    if now < opens {
        ShiftStatus::Before
    } else if now <= closes {
        ShiftStatus::Ready
    } else {
        ShiftStatus::Missed
    }
}

/// Renders the display text for `status`.
pub fn status_message(
    policy: &CheckInPolicy,
    shift: &ShiftTimes,
    status: ShiftStatus,
    now: NaiveDateTime,
) -> String {
    let start = shift.window.start();
    let end = shift.window.end();

    match status {
        ShiftStatus::Before => format!(
            "Check-in opens in {} · shift starts in {}",
            format_duration((start - policy.opens_before()) - now),
            format_duration(start - now)
        ),
        ShiftStatus::Ready if now <= start => {
            format!("Ready to check in · shift starts in {}", format_duration(start - now))
        }
        ShiftStatus::Ready => {
            format!("Ready to check in · started {} ago", format_duration(now - start))
        }
        ShiftStatus::CheckedIn => match shift.clock_in_at {
            Some(at) => format!(
                "Checked in at {} · {} remaining",
                at.format("%H:%M"),
                format_duration(end - now)
            ),
            None => format!("Checked in · {} remaining", format_duration(end - now)),
        },
        ShiftStatus::Overtime => {
            format!("Overtime · {} past scheduled end", format_duration(now - end))
        }
        ShiftStatus::OvertimeExpired => {
            "Overtime window expired · contact a manager to close this shift".to_string()
        }
        ShiftStatus::Missed => "Check-in window missed".to_string(),
        ShiftStatus::CheckedOut => match (shift.clock_in_at, shift.clock_out_at) {
            (Some(clock_in), Some(clock_out)) => format!(
                "Checked out at {} · worked {}",
                clock_out.format("%H:%M"),
                format_duration(clock_out - clock_in)
            ),
            (None, Some(clock_out)) => format!("Checked out at {}", clock_out.format("%H:%M")),
            _ => "Checked out".to_string(),
        },
    }
}

/// Computes the status of `shift` at `now` together with its message and actions.
pub fn evaluate(policy: &CheckInPolicy, shift: &ShiftTimes, now: NaiveDateTime) -> StatusReport {
    let status = compute_status(policy, shift, now);
    StatusReport {
        status,
        message: status_message(policy, shift, status, now),
        can_check_in: status.can_check_in(),
        can_check_out: status.can_check_out(),
    }
}

/// "2h 5m", or "5m" under an hour. Sign is dropped; seconds are truncated.
fn format_duration(d: Duration) -> String {
    let minutes = d.num_minutes().unsigned_abs();
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

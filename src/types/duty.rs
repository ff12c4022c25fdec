//! Duty-status types produced by the simulator

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Duty status of a log segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "DR")]
    Drive,
    #[serde(rename = "ON")]
    OnDuty,
    #[serde(rename = "OFF")]
    OffDuty,
}

impl DutyStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            DutyStatus::Drive => "DR",
            DutyStatus::OnDuty => "ON",
            DutyStatus::OffDuty => "OFF",
        }
    }

    /// Driving counts as on-duty time.
    pub const fn is_on_duty(self) -> bool {
        matches!(self, DutyStatus::Drive | DutyStatus::OnDuty)
    }
}

/// Named activity attached to a non-driving segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    #[serde(rename = "Pickup")]
    Pickup,
    #[serde(rename = "Fuel stop")]
    FuelStop,
    #[serde(rename = "30-min break")]
    Break,
    #[serde(rename = "10-hour reset")]
    Reset,
    #[serde(rename = "Drop-off")]
    Dropoff,
}

impl Activity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Activity::Pickup => "Pickup",
            Activity::FuelStop => "Fuel stop",
            Activity::Break => "30-min break",
            Activity::Reset => "10-hour reset",
            Activity::Dropoff => "Drop-off",
        }
    }
}

/// One contiguous stretch of a single duty status
#[derive(Debug, Clone, PartialEq)]
pub struct DutySegment {
    /// Elapsed time since the trip started.
    pub offset: Duration,
    pub status: DutyStatus,
    pub duration_hours: f64,
    pub activity: Option<Activity>,
    pub location: Option<String>,
}

/// Totals for one day-log, all derived from its segments
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DaySummary {
    pub drive_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub fuel_stops: u32,
}

/// Segments and totals attributed to one calendar day of a trip
#[derive(Debug, Clone, PartialEq)]
pub struct DayLog {
    /// 1-based
    pub day_number: u32,
    pub date: NaiveDate,
    pub start_offset: Duration,
    pub end_offset: Duration,
    pub segments: Vec<DutySegment>,
    pub summary: DaySummary,
}

/// Convert fractional hours into an elapsed duration (millisecond precision).
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * 3_600_000.0).round() as i64)
}

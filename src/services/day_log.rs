//! Day-log finalization
//!
//! Turns the segments accumulated for one day into an immutable [`DayLog`]
//! with its summary totals.

use chrono::{DateTime, Utc};

use crate::types::duty::hours_to_duration;
use crate::types::trip::round2;
use crate::types::{Activity, DayLog, DaySummary, DutySegment, DutyStatus};

/// Sum drive, on-duty and off-duty hours and count fuel stops.
pub fn summarize(segments: &[DutySegment]) -> DaySummary {
    let mut drive = 0.0;
    let mut on_duty = 0.0;
    let mut off_duty = 0.0;
    let mut fuel_stops = 0;

    for segment in segments {
        match segment.status {
            DutyStatus::Drive => {
                drive += segment.duration_hours;
                on_duty += segment.duration_hours;
            }
            DutyStatus::OnDuty => on_duty += segment.duration_hours,
            DutyStatus::OffDuty => off_duty += segment.duration_hours,
        }
        if segment.activity == Some(Activity::FuelStop) {
            fuel_stops += 1;
        }
    }

    DaySummary {
        drive_hours: round2(drive),
        on_duty_hours: round2(on_duty),
        off_duty_hours: round2(off_duty),
        fuel_stops,
    }
}

/// Build the log for one day.
///
/// `start_hours`/`end_hours` are elapsed hours since `trip_start`; the
/// calendar date is taken from the day's start.
pub fn finalize_day(
    day_number: u32,
    segments: Vec<DutySegment>,
    start_hours: f64,
    end_hours: f64,
    trip_start: DateTime<Utc>,
) -> DayLog {
    let start_offset = hours_to_duration(start_hours);
    let summary = summarize(&segments);

    DayLog {
        day_number,
        date: (trip_start + start_offset).date_naive(),
        start_offset,
        end_offset: hours_to_duration(end_hours),
        segments,
        summary,
    }
}

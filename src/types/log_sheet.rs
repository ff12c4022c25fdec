//! Log sheet wire format
//!
//! This is the JSON shape the trip service hands to clients:
//! `{day, date, start_time, end_time, entries: [...], summary: {...}}`.
//! Elapsed offsets are rendered as `H:MM:SS`, prefixed with `N day, ` /
//! `N days, ` once they pass 24 hours.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::duty::{Activity, DayLog, DaySummary, DutySegment, DutyStatus};

/// One day of a driver's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSheet {
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub entries: Vec<LogEntry>,
    pub summary: DaySummary,
}

/// A single duty-status entry on a log sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: String,
    pub status: DutyStatus,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl From<&DutySegment> for LogEntry {
    fn from(segment: &DutySegment) -> Self {
        Self {
            time: format_elapsed(segment.offset),
            status: segment.status,
            duration: segment.duration_hours,
            activity: segment.activity,
            location: segment.location.clone(),
        }
    }
}

impl From<&DayLog> for LogSheet {
    fn from(log: &DayLog) -> Self {
        Self {
            day: log.day_number,
            date: log.date.format("%Y-%m-%d").to_string(),
            start_time: format_elapsed(log.start_offset),
            end_time: format_elapsed(log.end_offset),
            entries: log.segments.iter().map(LogEntry::from).collect(),
            summary: log.summary,
        }
    }
}

/// Convert a list of day-logs into their wire representation.
pub fn to_log_sheets(logs: &[DayLog]) -> Vec<LogSheet> {
    logs.iter().map(LogSheet::from).collect()
}

/// Render an elapsed duration as `[N day[s], ]H:MM:SS[.ffffff]`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let negative = elapsed < Duration::zero();
    let elapsed = if negative { -elapsed } else { elapsed };

    let total_secs = elapsed.num_seconds();
    let micros = (elapsed - Duration::seconds(total_secs))
        .num_microseconds()
        .unwrap_or(0);

    let days = total_secs / 86_400;
    let rem = total_secs % 86_400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{} {}, ", days, unit));
    }
    out.push_str(&format!("{}:{:02}:{:02}", h, m, s));
    if micros > 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}

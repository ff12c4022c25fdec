//! Rendering of day-logs for output
//!
//! JSON follows the log sheet wire format, CSV carries one row per duty
//! segment, text is a short per-day summary for terminals.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::log_sheet::format_elapsed;
use crate::types::{to_log_sheets, DayLog};

/// Output format for rendered logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Text,
}

/// Flat CSV row for a single duty segment
#[derive(Debug, Serialize)]
struct CsvSegmentRow<'a> {
    day: u32,
    date: String,
    time: String,
    status: &'static str,
    duration_hours: f64,
    activity: &'static str,
    location: &'a str,
}

/// Render day-logs in the requested format.
pub fn render(logs: &[DayLog], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => to_json(&to_log_sheets(logs)),
        ExportFormat::Csv => to_csv(logs),
        ExportFormat::Text => Ok(to_text(logs)),
    }
}

/// Pretty-printed JSON of any serializable payload.
pub fn to_json<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    serde_json::to_string_pretty(payload).context("Failed to serialize logs to JSON")
}

pub fn to_csv(logs: &[DayLog]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    for log in logs {
        let date = log.date.format("%Y-%m-%d").to_string();
        for segment in &log.segments {
            writer.serialize(CsvSegmentRow {
                day: log.day_number,
                date: date.clone(),
                time: format_elapsed(segment.offset),
                status: segment.status.as_str(),
                duration_hours: segment.duration_hours,
                activity: segment.activity.map_or("", |a| a.as_str()),
                location: segment.location.as_deref().unwrap_or(""),
            })?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

pub fn to_text(logs: &[DayLog]) -> String {
    if logs.is_empty() {
        return "No log sheets (trip has no distance)\n".to_string();
    }

    let mut out = String::new();
    for log in logs {
        let s = &log.summary;
        let _ = writeln!(
            out,
            "Day {} ({}) {} - {}: drive {:.2} h, on duty {:.2} h, off duty {:.2} h, fuel stops {}",
            log.day_number,
            log.date.format("%Y-%m-%d"),
            format_elapsed(log.start_offset),
            format_elapsed(log.end_offset),
            s.drive_hours,
            s.on_duty_hours,
            s.off_duty_hours,
            s.fuel_stops
        );
    }
    let _ = writeln!(out, "Total days: {}", logs.len());
    out
}

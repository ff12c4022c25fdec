//! CLI argument parsing for the hos-logbook binary.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use hos_logbook::services::export::ExportFormat;

#[derive(Parser)]
#[command(name = "hos-logbook", about = "Hours-of-Service driver log generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Simulate a trip from explicit parameters
    Simulate {
        /// Total driving distance in miles
        #[arg(long)]
        distance_miles: f64,
        /// Pickup location label
        #[arg(long)]
        pickup: String,
        /// Dropoff location label
        #[arg(long)]
        dropoff: String,
        /// Hours already on duty before the trip
        #[arg(long, default_value_t = 0.0)]
        cycle_hours: f64,
        /// Trip start (RFC 3339); defaults to now
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Generate logs for a trip record stored as JSON
    Trip {
        /// Path to the trip record
        #[arg(long)]
        file: PathBuf,
        /// Routed distance in meters; replaces the record's distance
        #[arg(long)]
        meters: Option<f64>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
    },
    /// Print the effective HOS rules
    Rules,
}

//! HOS Logbook - CLI for the Hours-of-Service duty-cycle simulator
//!
//! Reads a trip from arguments or a JSON trip record and prints its daily
//! log sheets.

mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use hos_logbook::config::Config;
use hos_logbook::services::export::{self, ExportFormat};
use hos_logbook::types::{to_log_sheets, Trip, TripInput, TripLogResponse};
use hos_logbook::{DutyCycleSimulator, HosRules};

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    std::fs::create_dir_all(&config.logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &config.logs_dir, "hos-logbook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries command output, so console logs go to stderr
    let console = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,hos_logbook=debug".into()),
        ))
        .with(console)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    info!("Configuration loaded");
    if config.rules != HosRules::default() {
        warn!("⚠ HOS rules differ from regulatory defaults: {:?}", config.rules);
    }

    let result = run(cli.command, &config);
    if let Err(e) = &result {
        error!("Command failed: {:#}", e);
    }
    result
}

fn run(command: Command, config: &Config) -> Result<()> {
    let simulator = DutyCycleSimulator::new(config.rules.clone())?;

    let output = match command {
        Command::Simulate {
            distance_miles,
            pickup,
            dropoff,
            cycle_hours,
            start,
            format,
        } => {
            let trip = Trip {
                total_distance: Some(distance_miles),
                ..Trip::new(pickup, dropoff, cycle_hours, start.unwrap_or_else(Utc::now))
            };
            let input: TripInput = trip.to_input();
            let logs = simulator.simulate(&input)?;
            export::render(&logs, format)?
        }
        Command::Trip { file, meters, format } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read trip record {}", file.display()))?;
            let mut trip: Trip = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid trip record {}", file.display()))?;

            if let Some(meters) = meters {
                trip.apply_route_distance(meters);
                info!("Trip {} routed: {:?} mi", trip.id, trip.total_distance);
            }

            let logs = simulator.simulate(&trip.to_input())?;
            match format {
                ExportFormat::Json => {
                    export::to_json(&TripLogResponse::new(&trip, to_log_sheets(&logs)))?
                }
                other => export::render(&logs, other)?,
            }
        }
        Command::Rules => export::to_json(simulator.rules())?,
    };

    println!("{}", output.trim_end());
    Ok(())
}

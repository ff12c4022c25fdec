//! HOS logbook - Hours-of-Service duty-cycle simulation
//!
//! Turns a planned trip (distance, pickup, dropoff, start time) into
//! day-by-day driver log sheets that respect break, on-duty window, daily
//! reset and fuel-stop rules. The core performs no I/O.

pub mod config;
pub mod defaults;
pub mod error;
pub mod services;
pub mod types;

pub use error::{HosError, HosResult};
pub use services::duty_cycle::{simulate, DutyCycleSimulator};
pub use services::hos_rules::HosRules;
pub use types::{DayLog, DaySummary, DutySegment, DutyStatus, Trip, TripInput};

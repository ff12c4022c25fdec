//! Trip types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults::{FUEL_STOP_INTERVAL_MILES, PICKUP_DROPOFF_ALLOWANCE_HOURS};
use crate::services::distance::meters_to_miles;

use super::log_sheet::LogSheet;

/// Everything the simulator needs to know about a planned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInput {
    /// Resolved driving distance. Absent or non-positive yields no logs.
    pub total_distance_miles: Option<f64>,
    pub pickup_location: String,
    pub dropoff_location: String,
    /// Hours already on duty before this trip
    #[serde(default)]
    pub current_cycle_hours: f64,
    /// Payroll allowance; the simulator always charges its own fixed bookends.
    #[serde(default = "default_pickup_dropoff_time")]
    pub pickup_dropoff_allowance_hours: f64,
    pub trip_start: DateTime<Utc>,
}

impl TripInput {
    pub fn fuel_stops_required(&self) -> u64 {
        fuel_stops_for(self.total_distance_miles)
    }

    pub fn worked_hours(&self) -> f64 {
        worked_hours_for(self.current_cycle_hours, self.pickup_dropoff_allowance_hours)
    }
}

/// Trip record as kept by the trip service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
    #[serde(default)]
    pub total_distance: Option<f64>,
    #[serde(default = "Utc::now")]
    pub start_time: DateTime<Utc>,
    #[serde(default = "default_pickup_dropoff_time")]
    pub pickup_dropoff_time: f64,
}

fn default_pickup_dropoff_time() -> f64 {
    PICKUP_DROPOFF_ALLOWANCE_HOURS
}

impl Trip {
    pub fn new(
        pickup_location: impl Into<String>,
        dropoff_location: impl Into<String>,
        current_cycle_hours: f64,
        start_time: DateTime<Utc>,
    ) -> Self {
        let pickup_location = pickup_location.into();
        Self {
            id: Uuid::new_v4(),
            current_location: pickup_location.clone(),
            pickup_location,
            dropoff_location: dropoff_location.into(),
            current_cycle_hours,
            total_distance: None,
            start_time,
            pickup_dropoff_time: PICKUP_DROPOFF_ALLOWANCE_HOURS,
        }
    }

    /// `floor(total_distance / 1000)`, or 0 while no distance is known.
    /// Derived from the current distance on every call.
    pub fn fuel_stops(&self) -> u64 {
        fuel_stops_for(self.total_distance)
    }

    /// Cycle hours plus the pickup/drop-off allowance, rounded to 2 places.
    pub fn worked_hours(&self) -> f64 {
        worked_hours_for(self.current_cycle_hours, self.pickup_dropoff_time)
    }

    /// Store a routed distance (in meters) and move the truck to the dropoff.
    pub fn apply_route_distance(&mut self, meters: f64) {
        self.total_distance = Some(meters_to_miles(meters));
        self.current_location = self.dropoff_location.clone();
    }

    pub fn to_input(&self) -> TripInput {
        TripInput {
            total_distance_miles: self.total_distance,
            pickup_location: self.pickup_location.clone(),
            dropoff_location: self.dropoff_location.clone(),
            current_cycle_hours: self.current_cycle_hours,
            pickup_dropoff_allowance_hours: self.pickup_dropoff_time,
            trip_start: self.start_time,
        }
    }
}

fn fuel_stops_for(distance_miles: Option<f64>) -> u64 {
    match distance_miles {
        Some(d) if d.is_finite() && d > 0.0 => (d / FUEL_STOP_INTERVAL_MILES).floor() as u64,
        _ => 0,
    }
}

fn worked_hours_for(cycle_hours: f64, allowance_hours: f64) -> f64 {
    round2(cycle_hours + allowance_hours)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Logs generated for an existing trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripLogResponse {
    pub trip_id: Uuid,
    pub pickup: String,
    pub dropoff: String,
    pub total_distance: Option<f64>,
    pub fuel_stops: u64,
    pub worked_hours: f64,
    pub log_sheets: Vec<LogSheet>,
    pub total_days: usize,
}

impl TripLogResponse {
    pub fn new(trip: &Trip, log_sheets: Vec<LogSheet>) -> Self {
        Self {
            trip_id: trip.id,
            pickup: trip.pickup_location.clone(),
            dropoff: trip.dropoff_location.clone(),
            total_distance: trip.total_distance,
            fuel_stops: trip.fuel_stops(),
            worked_hours: trip.worked_hours(),
            total_days: log_sheets.len(),
            log_sheets,
        }
    }
}

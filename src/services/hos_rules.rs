//! Hours-of-Service rule configuration

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{HosError, HosResult};

/// Named limits the duty-cycle simulator schedules against.
///
/// All durations are in hours. Drive and on-duty limits are not checked by
/// [`HosRules::validate`]: limits that leave no room to drive surface as
/// [`HosError::SchedulingInfeasible`] from the simulation itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HosRules {
    pub drive_speed_mph: f64,
    pub max_continuous_drive_hours: f64,
    pub break_duration_hours: f64,
    pub max_drive_hours_per_duty_period: f64,
    pub max_on_duty_hours_per_day: f64,
    pub daily_reset_hours: f64,
    pub fuel_stop_interval_miles: f64,
    pub fuel_stop_duration_hours: f64,
    /// Fixed on-duty time charged at pickup
    pub pickup_hours: f64,
    /// Fixed on-duty time charged at drop-off
    pub dropoff_hours: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            drive_speed_mph: defaults::DRIVE_SPEED_MPH,
            max_continuous_drive_hours: defaults::MAX_CONTINUOUS_DRIVE_HOURS,
            break_duration_hours: defaults::BREAK_DURATION_HOURS,
            max_drive_hours_per_duty_period: defaults::MAX_DRIVE_HOURS_PER_DUTY_PERIOD,
            max_on_duty_hours_per_day: defaults::MAX_ON_DUTY_HOURS_PER_DAY,
            daily_reset_hours: defaults::DAILY_RESET_HOURS,
            fuel_stop_interval_miles: defaults::FUEL_STOP_INTERVAL_MILES,
            fuel_stop_duration_hours: defaults::FUEL_STOP_DURATION_HOURS,
            pickup_hours: defaults::PICKUP_HOURS,
            dropoff_hours: defaults::DROPOFF_HOURS,
        }
    }
}

impl HosRules {
    /// Hours of driving between consecutive fuel-stop thresholds
    pub fn fuel_interval_hours(&self) -> f64 {
        self.fuel_stop_interval_miles / self.drive_speed_mph
    }

    /// `floor(distance / fuel_stop_interval_miles)`
    ///
    /// Counted in `u64`; only quotients past `u64::MAX` (about 1.8e19 stops)
    /// saturate.
    pub fn fuel_stops_for(&self, distance_miles: f64) -> u64 {
        (distance_miles / self.fuel_stop_interval_miles).floor().max(0.0) as u64
    }

    pub fn validate(&self) -> HosResult<()> {
        let positive = [
            ("drive_speed_mph", self.drive_speed_mph),
            ("fuel_stop_interval_miles", self.fuel_stop_interval_miles),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(HosError::InvalidRules { field, value });
            }
        }

        let durations = [
            ("break_duration_hours", self.break_duration_hours),
            ("daily_reset_hours", self.daily_reset_hours),
            ("fuel_stop_duration_hours", self.fuel_stop_duration_hours),
            ("pickup_hours", self.pickup_hours),
            ("dropoff_hours", self.dropoff_hours),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(HosError::InvalidRules { field, value });
            }
        }

        let limits = [
            ("max_continuous_drive_hours", self.max_continuous_drive_hours),
            ("max_drive_hours_per_duty_period", self.max_drive_hours_per_duty_period),
            ("max_on_duty_hours_per_day", self.max_on_duty_hours_per_day),
        ];
        for (field, value) in limits {
            if value.is_nan() {
                return Err(HosError::InvalidRules { field, value });
            }
        }

        Ok(())
    }
}

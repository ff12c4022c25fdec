//! Regulatory defaults for the duty-cycle simulator.

pub const DRIVE_SPEED_MPH: f64 = 60.0;
pub const MAX_CONTINUOUS_DRIVE_HOURS: f64 = 8.0;
pub const BREAK_DURATION_HOURS: f64 = 0.5;
pub const MAX_DRIVE_HOURS_PER_DUTY_PERIOD: f64 = 11.0;
pub const MAX_ON_DUTY_HOURS_PER_DAY: f64 = 14.0;
pub const DAILY_RESET_HOURS: f64 = 10.0;
pub const FUEL_STOP_INTERVAL_MILES: f64 = 1000.0;
pub const FUEL_STOP_DURATION_HOURS: f64 = 0.25;
pub const PICKUP_HOURS: f64 = 1.0;
pub const DROPOFF_HOURS: f64 = 1.0;

/// Payroll allowance stored on a trip record. Not used by the simulator.
pub const PICKUP_DROPOFF_ALLOWANCE_HOURS: f64 = 2.0;

/// Meters per statute mile, as used when converting routing distances.
pub const METERS_PER_MILE: f64 = 1609.34;

pub fn default_logs_dir() -> String {
    "logs".to_string()
}

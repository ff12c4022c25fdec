//! Distance unit conversion for routed trips

use crate::defaults::METERS_PER_MILE;
use crate::types::trip::round2;

/// Convert a routing-provider distance in meters to miles, rounded to 2 places.
pub fn meters_to_miles(meters: f64) -> f64 {
    round2(meters / METERS_PER_MILE)
}

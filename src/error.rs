//! Error types for the duty-cycle core

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HosError {
    /// No positive drive chunk fits, even right after a reset.
    #[error(
        "scheduling infeasible on day {day}: no drive time available after reset \
         ({remaining_drive_hours:.2} h of driving left)"
    )]
    SchedulingInfeasible {
        day: u32,
        remaining_drive_hours: f64,
    },

    /// A rule constant the simulation cannot run with.
    #[error("invalid HOS rule {field}: {value}")]
    InvalidRules { field: &'static str, value: f64 },
}

pub type HosResult<T> = Result<T, HosError>;

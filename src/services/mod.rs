//! Business logic services

pub mod day_log;
pub mod distance;
pub mod duty_cycle;
pub mod export;
pub mod hos_rules;

//! Configuration management

use anyhow::{Context, Result};

use crate::defaults;
use crate::services::hos_rules::HosRules;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for rolling log files
    pub logs_dir: String,

    /// Emit JSON log lines on stderr instead of plain text
    pub json_logs: bool,

    /// HOS rules, defaults overridden by `HOS_*` variables
    pub rules: HosRules,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let logs_dir = lookup("LOGS_DIR").unwrap_or_else(defaults::default_logs_dir);

        let json_logs = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let mut rules = HosRules::default();
        let overrides: [(&str, &mut f64); 10] = [
            ("HOS_DRIVE_SPEED_MPH", &mut rules.drive_speed_mph),
            ("HOS_MAX_CONTINUOUS_DRIVE_HOURS", &mut rules.max_continuous_drive_hours),
            ("HOS_BREAK_DURATION_HOURS", &mut rules.break_duration_hours),
            ("HOS_MAX_DRIVE_HOURS_PER_DUTY_PERIOD", &mut rules.max_drive_hours_per_duty_period),
            ("HOS_MAX_ON_DUTY_HOURS_PER_DAY", &mut rules.max_on_duty_hours_per_day),
            ("HOS_DAILY_RESET_HOURS", &mut rules.daily_reset_hours),
            ("HOS_FUEL_STOP_INTERVAL_MILES", &mut rules.fuel_stop_interval_miles),
            ("HOS_FUEL_STOP_DURATION_HOURS", &mut rules.fuel_stop_duration_hours),
            ("HOS_PICKUP_HOURS", &mut rules.pickup_hours),
            ("HOS_DROPOFF_HOURS", &mut rules.dropoff_hours),
        ];
        for (key, slot) in overrides {
            if let Some(raw) = lookup(key) {
                *slot = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be a number (got '{}')", key, raw))?;
            }
        }

        rules
            .validate()
            .context("HOS rule overrides are invalid")?;

        Ok(Self {
            logs_dir,
            json_logs,
            rules,
        })
    }
}

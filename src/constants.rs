// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Default analysis parameters and the environment variables that override them.

/// Service identity used in structured logs
pub mod service {
    /// Service name reported by the logging layer
    pub const SERVICE_NAME: &str = "workout-insight";

    /// Crate version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Default windows and thresholds for recent-workout analysis
pub mod analysis {
    /// A workout older than this is not considered recent
    pub const RECENCY_WINDOW_HOURS: i64 = 72;

    /// Workouts shorter than five minutes are ignored by the locator
    pub const MIN_DURATION_SECONDS: u64 = 300;

    /// How far back similar workouts are collected for the baseline
    pub const BASELINE_LOOKBACK_DAYS: i64 = 14;

    /// Fewest similar workouts that make a usable baseline
    pub const MIN_BASELINE_WORKOUTS: usize = 2;

    /// Deviations within this magnitude (percent) are neutral
    pub const NEUTRAL_BAND_PCT: f64 = 5.0;

    /// Deviations at or beyond this magnitude (percent) are extreme
    pub const EXTREME_THRESHOLD_PCT: f64 = 6.0;

    /// Hours in a day, for recency phrasing
    pub const HOURS_PER_DAY: u64 = 24;

    /// Meters per kilometer, for pace conversion
    pub const METERS_PER_KM: f64 = 1000.0;
}

/// Environment variable names
pub mod env_config {
    use std::env;

    pub const RECENCY_WINDOW_HOURS: &str = "INSIGHT_RECENCY_WINDOW_HOURS";
    pub const MIN_DURATION_SECONDS: &str = "INSIGHT_MIN_DURATION_SECONDS";
    pub const BASELINE_LOOKBACK_DAYS: &str = "INSIGHT_BASELINE_LOOKBACK_DAYS";
    pub const MIN_BASELINE_WORKOUTS: &str = "INSIGHT_MIN_BASELINE_WORKOUTS";
    pub const NEUTRAL_BAND_PCT: &str = "INSIGHT_NEUTRAL_BAND_PCT";
    pub const EXTREME_THRESHOLD_PCT: &str = "INSIGHT_EXTREME_THRESHOLD_PCT";
    pub const SIGNAL_PRECEDENCE: &str = "INSIGHT_SIGNAL_PRECEDENCE";

    /// Default config file looked up in the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "workout_insight.toml";

    /// Get config file path from environment
    pub fn config_path() -> Option<String> {
        env::var("INSIGHT_CONFIG_PATH").ok()
    }

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}

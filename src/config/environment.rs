// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based overrides for analysis settings

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;

use super::AnalysisConfig;
use crate::constants::env_config;

impl AnalysisConfig {
    /// Apply `INSIGHT_*` environment overrides on top of the current values
    ///
    /// A variable that is set but does not parse is an error; it is never
    /// silently replaced by the default.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(v) = env_override(env_config::RECENCY_WINDOW_HOURS)? {
            self.recency_window_hours = v;
        }
        if let Some(v) = env_override(env_config::MIN_DURATION_SECONDS)? {
            self.min_duration_seconds = v;
        }
        if let Some(v) = env_override(env_config::BASELINE_LOOKBACK_DAYS)? {
            self.baseline_lookback_days = v;
        }
        if let Some(v) = env_override(env_config::MIN_BASELINE_WORKOUTS)? {
            self.min_baseline_workouts = v;
        }
        if let Some(v) = env_override(env_config::NEUTRAL_BAND_PCT)? {
            self.neutral_band_pct = v;
        }
        if let Some(v) = env_override(env_config::EXTREME_THRESHOLD_PCT)? {
            self.extreme_threshold_pct = v;
        }
        if let Some(v) = env_override(env_config::SIGNAL_PRECEDENCE)? {
            self.signal_precedence = v;
        }

        self.validate().context("Invalid analysis settings after environment overrides")?;
        Ok(())
    }

    /// One-line summary of the effective settings for logging
    pub fn summary(&self) -> String {
        format!(
            "recency={}h min_duration={}s lookback={}d min_baseline={} neutral=±{}% extreme=±{}% precedence={}",
            self.recency_window_hours,
            self.min_duration_seconds,
            self.baseline_lookback_days,
            self.min_baseline_workouts,
            self.neutral_band_pct,
            self.extreme_threshold_pct,
            self.signal_precedence,
        )
    }
}

/// Parse an environment variable if it is set
fn env_override<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => {
            let value = raw
                .trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{}", e))
                .with_context(|| format!("Invalid {} value: {:?}", key, raw))?;
            info!(env.key = %key, "Applied analysis override from environment");
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::deviation::SignalPrecedence;

    // Each test owns distinct variables so they can run in parallel.

    #[test]
    fn test_env_override_parses_values() {
        env::set_var("INSIGHT_TEST_PARSE_OK", " 48 ");
        let parsed: Option<i64> = env_override("INSIGHT_TEST_PARSE_OK").unwrap();
        assert_eq!(parsed, Some(48));
        env::remove_var("INSIGHT_TEST_PARSE_OK");

        let missing: Option<i64> = env_override("INSIGHT_TEST_NEVER_SET").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_env_override_rejects_garbage() {
        env::set_var("INSIGHT_TEST_PARSE_BAD", "seventy-two");
        let parsed: Result<Option<i64>> = env_override("INSIGHT_TEST_PARSE_BAD");
        assert!(parsed.is_err());
        env::remove_var("INSIGHT_TEST_PARSE_BAD");
    }

    #[test]
    fn test_apply_env_overrides() {
        env::set_var(env_config::MIN_DURATION_SECONDS, "600");
        env::set_var(env_config::SIGNAL_PRECEDENCE, "pace");

        let mut config = AnalysisConfig::default();
        config.apply_env_overrides().unwrap();

        assert_eq!(config.min_duration_seconds, 600);
        assert_eq!(config.signal_precedence, SignalPrecedence::Pace);
        assert_eq!(config.recency_window_hours, 72);

        env::remove_var(env_config::MIN_DURATION_SECONDS);
        env::remove_var(env_config::SIGNAL_PRECEDENCE);
    }

    #[test]
    fn test_summary_mentions_thresholds() {
        let summary = AnalysisConfig::default().summary();
        assert!(summary.contains("recency=72h"));
        assert!(summary.contains("extreme=±6%"));
        assert!(summary.contains("precedence=heart_rate"));
    }
}

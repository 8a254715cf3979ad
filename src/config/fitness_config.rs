// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fitness-specific configuration for sport types and analysis thresholds

use anyhow::{bail, Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{analysis, env_config};
use crate::intelligence::deviation::SignalPrecedence;

/// Main fitness configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitnessConfig {
    /// Provider sport name -> internal tag
    pub sport_types: HashMap<String, String>,
    pub analysis: AnalysisConfig,
}

/// Windows and thresholds used by the analysis pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// How far back a workout still counts as recent
    pub recency_window_hours: i64,
    /// Shortest workout the locator will pick
    pub min_duration_seconds: u64,
    /// Baseline lookback before the reference time
    pub baseline_lookback_days: i64,
    /// Fewest similar workouts for a valid baseline
    pub min_baseline_workouts: usize,
    /// Deviations up to this magnitude read as "in line with baseline"
    pub neutral_band_pct: f64,
    /// Deviations at or past this magnitude are Strong/Fatigued
    pub extreme_threshold_pct: f64,
    /// Which signal wins when HR and pace point in opposite directions
    pub signal_precedence: SignalPrecedence,
}

impl FitnessConfig {
    /// Load fitness configuration from file or use defaults
    pub fn load(path: Option<String>) -> Result<Self> {
        // Try explicit path first
        if let Some(config_path) = path.or_else(env_config::config_path) {
            return Self::load_from_file(&config_path);
        }

        // Try default config file
        if Path::new(env_config::DEFAULT_CONFIG_FILE).exists() {
            return Self::load_from_file(env_config::DEFAULT_CONFIG_FILE);
        }

        debug!("No config file found, using built-in defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fitness config file: {}", path))?;

        let config: FitnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse fitness config file: {}", path))?;

        config
            .analysis
            .validate()
            .with_context(|| format!("Invalid analysis settings in {}", path))?;

        Ok(config)
    }

    /// Get the internal sport type name for a provider sport type
    pub fn map_sport_type(&self, provider_sport: &str) -> Option<&str> {
        self.sport_types.get(provider_sport).map(|s| s.as_str())
    }
}

impl AnalysisConfig {
    /// Recency window as a duration, saturating when out of range
    pub fn recency_window(&self) -> Duration {
        Duration::try_hours(self.recency_window_hours).unwrap_or(Duration::MAX)
    }

    /// Baseline lookback as a duration, saturating when out of range
    pub fn baseline_lookback(&self) -> Duration {
        Duration::try_days(self.baseline_lookback_days).unwrap_or(Duration::MAX)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.recency_window_hours <= 0 {
            bail!("recency_window_hours must be positive, got {}", self.recency_window_hours);
        }
        if Duration::try_hours(self.recency_window_hours).is_none() {
            bail!("recency_window_hours is out of range, got {}", self.recency_window_hours);
        }
        if self.baseline_lookback_days <= 0 {
            bail!("baseline_lookback_days must be positive, got {}", self.baseline_lookback_days);
        }
        if Duration::try_days(self.baseline_lookback_days).is_none() {
            bail!("baseline_lookback_days is out of range, got {}", self.baseline_lookback_days);
        }
        if self.min_baseline_workouts == 0 {
            bail!("min_baseline_workouts must be at least 1");
        }
        if !self.neutral_band_pct.is_finite() || self.neutral_band_pct <= 0.0 {
            bail!("neutral_band_pct must be a positive number, got {}", self.neutral_band_pct);
        }
        if !self.extreme_threshold_pct.is_finite()
            || self.extreme_threshold_pct <= self.neutral_band_pct
        {
            bail!(
                "extreme_threshold_pct ({}) must exceed neutral_band_pct ({})",
                self.extreme_threshold_pct,
                self.neutral_band_pct
            );
        }
        Ok(())
    }
}

impl Default for FitnessConfig {
    fn default() -> Self {
        let mut sport_types = HashMap::new();

        // Running
        sport_types.insert("Run".to_string(), "running".to_string());
        sport_types.insert("VirtualRun".to_string(), "running".to_string());
        sport_types.insert("TrailRun".to_string(), "running".to_string());
        sport_types.insert("TrailRunning".to_string(), "running".to_string());
        sport_types.insert("Treadmill".to_string(), "running".to_string());

        // Cycling
        sport_types.insert("Ride".to_string(), "cycling".to_string());
        sport_types.insert("VirtualRide".to_string(), "cycling".to_string());
        sport_types.insert("EBikeRide".to_string(), "cycling".to_string());
        sport_types.insert("MountainBikeRide".to_string(), "cycling".to_string());
        sport_types.insert("GravelRide".to_string(), "cycling".to_string());

        // Swimming
        sport_types.insert("Swim".to_string(), "swimming".to_string());
        sport_types.insert("OpenWaterSwim".to_string(), "swimming".to_string());

        // Strength and mobility
        sport_types.insert("WeightTraining".to_string(), "strength_training".to_string());
        sport_types.insert("Crossfit".to_string(), "strength_training".to_string());
        sport_types.insert("Yoga".to_string(), "yoga".to_string());

        Self {
            sport_types,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            recency_window_hours: analysis::RECENCY_WINDOW_HOURS,
            min_duration_seconds: analysis::MIN_DURATION_SECONDS,
            baseline_lookback_days: analysis::BASELINE_LOOKBACK_DAYS,
            min_baseline_workouts: analysis::MIN_BASELINE_WORKOUTS,
            neutral_band_pct: analysis::NEUTRAL_BAND_PCT,
            extreme_threshold_pct: analysis::EXTREME_THRESHOLD_PCT,
            signal_precedence: SignalPrecedence::default(),
        }
    }
}

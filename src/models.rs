// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Read-only workout records handed to the analysis engine by an external
//! data-access layer.
//!
//! ## Design Principles
//!
//! - **Provider Agnostic**: sport names from any provider are mapped onto a
//!   small internal tag set
//! - **Explicit Absence**: optional metrics are `Option`, never zero
//! - **Tolerant Records**: a record missing its start time or duration is
//!   kept but treated as structurally invalid by every analysis stage
//!
//! ## Core Models
//!
//! - [`Activity`]: a single recorded workout
//! - [`SportType`]: the internal activity type tag

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::analysis::METERS_PER_KM;

/// A single recorded workout
///
/// # Examples
///
/// ```rust
/// use workout_insight::models::{Activity, SportType};
/// use chrono::Utc;
///
/// let mut activity = Activity::new("12345", SportType::Running, Utc::now(), 1800);
/// activity.distance_meters = Some(5000.0);
/// activity.average_heart_rate = Some(150.0);
///
/// assert_eq!(activity.pace_seconds_per_km(), Some(360.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for the activity (provider-specific)
    pub id: String,
    /// Human-readable title, if the provider supplies one
    pub name: Option<String>,
    /// Internal activity type tag
    pub sport_type: SportType,
    /// When the activity started (UTC); required for analysis
    pub start_date: Option<DateTime<Utc>>,
    /// Total duration in seconds; required for analysis
    pub duration_seconds: Option<u64>,
    /// Total distance covered in meters (if applicable)
    pub distance_meters: Option<f64>,
    /// Average heart rate over the session (BPM)
    pub average_heart_rate: Option<f64>,
    /// Provider-supplied aerobic training effect, passed through unmodified
    pub aerobic_training_effect: Option<f64>,
}

impl Activity {
    /// Create a structurally valid activity with no optional metrics
    pub fn new(
        id: impl Into<String>,
        sport_type: SportType,
        start_date: DateTime<Utc>,
        duration_seconds: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            sport_type,
            start_date: Some(start_date),
            duration_seconds: Some(duration_seconds),
            distance_meters: None,
            average_heart_rate: None,
            aerobic_training_effect: None,
        }
    }

    /// Start time and duration, or `None` when the record is structurally invalid
    pub fn timing(&self) -> Option<(DateTime<Utc>, u64)> {
        match (self.start_date, self.duration_seconds) {
            (Some(start), Some(duration)) => Some((start, duration)),
            _ => None,
        }
    }

    /// Whether the record carries both required fields
    pub fn is_structurally_valid(&self) -> bool {
        self.timing().is_some()
    }

    /// Pace in seconds per kilometer
    ///
    /// Only defined for a positive distance; pace is never estimated.
    pub fn pace_seconds_per_km(&self) -> Option<f64> {
        let duration = self.duration_seconds?;
        let distance = self.distance_meters.filter(|d| *d > 0.0)?;
        Some(duration as f64 / (distance / METERS_PER_KM))
    }

    /// Short reason a record cannot be analysed
    pub fn invalid_reason(&self) -> Option<&'static str> {
        match (self.start_date, self.duration_seconds) {
            (None, None) => Some("missing start timestamp and duration"),
            (None, Some(_)) => Some("missing start timestamp"),
            (Some(_), None) => Some("missing duration"),
            (Some(_), Some(_)) => None,
        }
    }
}

/// Internal activity type tag
///
/// Provider-specific names ("Run", "VirtualRide", "WeightTraining", ...) are
/// mapped onto this set through [`crate::config::FitnessConfig`]. Anything
/// that does not map lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportType {
    /// Running activity
    Running,
    /// Cycling activity
    Cycling,
    /// Swimming activity
    Swimming,
    /// Weight/strength training
    StrengthTraining,
    /// Yoga practice
    Yoga,
    /// Any activity outside the categories above
    #[serde(other)]
    Other,
}

impl SportType {
    /// Create SportType from a provider string using the configured mapping
    pub fn from_provider_string(
        provider_sport: &str,
        fitness_config: &crate::config::FitnessConfig,
    ) -> Self {
        if let Some(internal_name) = fitness_config.map_sport_type(provider_sport) {
            return Self::from_internal_string(internal_name);
        }

        // Records already carrying an internal tag map to themselves
        Self::from_internal_string(&provider_sport.to_lowercase())
    }

    /// Create SportType from an internal tag
    pub fn from_internal_string(internal_name: &str) -> Self {
        match internal_name {
            "running" => SportType::Running,
            "cycling" => SportType::Cycling,
            "swimming" => SportType::Swimming,
            "strength_training" => SportType::StrengthTraining,
            "yoga" => SportType::Yoga,
            _ => SportType::Other,
        }
    }

    /// Internal tag as written in configuration and JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            SportType::Running => "running",
            SportType::Cycling => "cycling",
            SportType::Swimming => "swimming",
            SportType::StrengthTraining => "strength_training",
            SportType::Yoga => "yoga",
            SportType::Other => "other",
        }
    }

    /// Get the human-readable name for this sport type
    pub fn display_name(&self) -> &'static str {
        match self {
            SportType::Running => "run",
            SportType::Cycling => "bike ride",
            SportType::Swimming => "swim",
            SportType::StrengthTraining => "strength training session",
            SportType::Yoga => "yoga session",
            SportType::Other => "workout",
        }
    }
}

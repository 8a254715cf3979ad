// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Intelligence Module
//!
//! Recent-workout analysis for LLM prompt assembly.
//!
//! Stages run strictly in order, each taking the previous stage's output plus
//! the full activity history:
//! - [`RecentWorkoutLocator`]: most recent qualifying workout
//! - [`BaselineComparator`]: same-sport baseline, deviations and trend
//! - [`PerformanceConditionClassifier`]: Strong / Normal / Fatigued
//! - [`AnalysisFormatter`]: plain-text narrative
//!
//! [`WorkoutAnalyzer`] wires the four together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Activity;

pub mod analyzer;
pub mod baseline;
pub mod condition;
pub mod deviation;
pub mod formatter;
pub mod locator;

pub use analyzer::{AnalysisError, WorkoutAnalyzer};
pub use baseline::BaselineComparator;
pub use condition::PerformanceConditionClassifier;
pub use deviation::{DeviationClassifier, DeviationOutcome, SignalPrecedence};
pub use formatter::AnalysisFormatter;
pub use locator::RecentWorkoutLocator;

/// The workout selected for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentWorkoutAnalysis {
    /// The chosen activity as supplied
    pub activity: Activity,
    /// Position of the activity in the input history
    pub source_index: usize,
    /// Validated start time
    pub start_date: DateTime<Utc>,
    /// Validated duration
    pub duration_seconds: u64,
    /// Whole hours between start and reference time, never negative
    pub hours_since_completion: u64,
    /// Present only when the activity reports a positive distance
    pub pace_seconds_per_km: Option<f64>,
}

/// Whether a baseline comparison could be made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonStatus {
    Valid,
    InsufficientData,
}

/// Deviation of the recent workout from its baseline
///
/// Sign convention for both deviations: positive is worse. A positive
/// `hr_deviation_pct` means a higher heart rate than baseline; a positive
/// `pace_deviation_pct` means a slower pace (more seconds per kilometer),
/// and a negative one means faster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub status: ComparisonStatus,
    /// Number of similar workouts in the baseline window
    pub baseline_count: usize,
    pub hr_deviation_pct: Option<f64>,
    pub pace_deviation_pct: Option<f64>,
    pub trend: TrendDirection,
}

impl ComparisonResult {
    /// A comparison that could not be made
    pub fn insufficient(baseline_count: usize) -> Self {
        Self {
            status: ComparisonStatus::InsufficientData,
            baseline_count,
            hr_deviation_pct: None,
            pace_deviation_pct: None,
            trend: TrendDirection::Unknown,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == ComparisonStatus::Valid
    }
}

/// Direction of the short-term trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
    Unknown,
}

impl From<DeviationOutcome> for TrendDirection {
    fn from(outcome: DeviationOutcome) -> Self {
        match outcome {
            DeviationOutcome::Better => TrendDirection::Improving,
            DeviationOutcome::Neutral => TrendDirection::Stable,
            DeviationOutcome::Worse => TrendDirection::Declining,
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
            TrendDirection::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Point-in-time condition of the athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceCondition {
    Strong,
    Normal,
    Fatigued,
}

impl From<DeviationOutcome> for PerformanceCondition {
    fn from(outcome: DeviationOutcome) -> Self {
        match outcome {
            DeviationOutcome::Better => PerformanceCondition::Strong,
            DeviationOutcome::Neutral => PerformanceCondition::Normal,
            DeviationOutcome::Worse => PerformanceCondition::Fatigued,
        }
    }
}

impl fmt::Display for PerformanceCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PerformanceCondition::Strong => "strong",
            PerformanceCondition::Normal => "normal",
            PerformanceCondition::Fatigued => "fatigued",
        };
        f.write_str(label)
    }
}

/// Full output of one analysis run
///
/// `narrative` is what the prompt builder includes verbatim; the structured
/// fields are there for callers that need machine-readable values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAnalysisReport {
    pub reference_time: DateTime<Utc>,
    pub recent: Option<RecentWorkoutAnalysis>,
    pub comparison: ComparisonResult,
    pub condition: PerformanceCondition,
    pub narrative: String,
}

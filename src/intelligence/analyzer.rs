// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout analyzer wiring the four analysis stages together

use chrono::{DateTime, Utc};
use tracing::instrument;

use super::{
    AnalysisFormatter, BaselineComparator, ComparisonResult, PerformanceConditionClassifier,
    RecentWorkoutLocator, WorkoutAnalysisReport,
};
use crate::config::AnalysisConfig;
use crate::logging::AppLogger;
use crate::models::Activity;

/// Main analyzer for recent-workout intelligence
#[derive(Debug, Clone)]
pub struct WorkoutAnalyzer {
    config: AnalysisConfig,
    locator: RecentWorkoutLocator,
    comparator: BaselineComparator,
    classifier: PerformanceConditionClassifier,
    formatter: AnalysisFormatter,
}

impl WorkoutAnalyzer {
    /// Create an analyzer, rejecting inconsistent thresholds
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            locator: RecentWorkoutLocator::new(&config),
            comparator: BaselineComparator::new(&config),
            classifier: PerformanceConditionClassifier::new(&config),
            formatter: AnalysisFormatter::new(&config),
            config,
        })
    }

    /// Settings this analyzer was built with
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run locate, compare, classify and format over one history
    ///
    /// Pure with respect to its inputs: the same history and reference time
    /// always produce the same report.
    #[instrument(level = "debug", skip(self, activities), fields(activities = activities.len()))]
    pub fn analyze(&self, activities: &[Activity], reference_time: DateTime<Utc>) -> WorkoutAnalysisReport {
        let recent = self.locator.locate(activities, reference_time);

        let comparison = match &recent {
            Some(recent) => self.comparator.compare(recent, activities, reference_time),
            None => ComparisonResult::insufficient(0),
        };

        let condition = self.classifier.classify_condition(&comparison);
        let narrative = self.formatter.format(recent.as_ref(), &comparison, condition);

        AppLogger::log_analysis_completed(
            recent.as_ref().map(|r| r.activity.id.as_str()),
            &comparison,
            condition,
        );

        WorkoutAnalysisReport {
            reference_time,
            recent,
            comparison,
            condition,
            narrative,
        }
    }
}

/// Errors that can occur while setting up analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Invalid analysis configuration: {0}")]
    InvalidConfiguration(String),
}

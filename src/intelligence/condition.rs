// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Condition classification from baseline deviations

use super::deviation::DeviationClassifier;
use super::{ComparisonResult, ComparisonStatus, PerformanceCondition};
use crate::config::AnalysisConfig;

/// Maps a comparison to Strong / Normal / Fatigued
#[derive(Debug, Clone, Default)]
pub struct PerformanceConditionClassifier {
    classifier: DeviationClassifier,
}

impl PerformanceConditionClassifier {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: DeviationClassifier::from_config(config),
        }
    }

    /// Classify the athlete's condition
    ///
    /// Without a usable baseline the condition is `Normal`.
    pub fn classify_condition(&self, comparison: &ComparisonResult) -> PerformanceCondition {
        if comparison.status == ComparisonStatus::InsufficientData {
            return PerformanceCondition::Normal;
        }
        self.classifier
            .classify(comparison.hr_deviation_pct, comparison.pace_deviation_pct)
    }
}

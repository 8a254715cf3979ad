// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Historical baseline comparison
//!
//! The baseline is built from workouts of the same sport type that started
//! within the lookback window before the reference time, excluding the
//! analysed workout itself. Heart rate and pace are averaged separately over
//! the pool members that report them.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use super::deviation::DeviationClassifier;
use super::{ComparisonResult, ComparisonStatus, RecentWorkoutAnalysis, TrendDirection};
use crate::config::AnalysisConfig;
use crate::models::Activity;

/// Averages over the baseline pool
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    pub count: usize,
    pub average_heart_rate: Option<f64>,
    pub average_pace_seconds_per_km: Option<f64>,
}

/// Compares a recent workout with similar past workouts
#[derive(Debug, Clone)]
pub struct BaselineComparator {
    lookback: Duration,
    min_baseline_workouts: usize,
    classifier: DeviationClassifier,
}

impl BaselineComparator {
    /// Create a comparator from analysis settings
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            lookback: config.baseline_lookback(),
            min_baseline_workouts: config.min_baseline_workouts,
            classifier: DeviationClassifier::from_config(config),
        }
    }

    /// Compare the recent workout with its baseline
    pub fn compare(
        &self,
        recent: &RecentWorkoutAnalysis,
        activities: &[Activity],
        reference_time: DateTime<Utc>,
    ) -> ComparisonResult {
        let pool = self.baseline_pool(recent, activities, reference_time);
        let baseline = Self::summarize(&pool);

        if baseline.count < self.min_baseline_workouts {
            debug!(
                baseline.count = baseline.count,
                baseline.required = self.min_baseline_workouts,
                "Not enough similar workouts for a baseline"
            );
            return ComparisonResult::insufficient(baseline.count);
        }

        let hr_deviation_pct = recent
            .activity
            .average_heart_rate
            .zip(baseline.average_heart_rate)
            .and_then(|(current, base)| deviation_pct(current, base));

        let pace_deviation_pct = recent
            .pace_seconds_per_km
            .zip(baseline.average_pace_seconds_per_km)
            .and_then(|(current, base)| deviation_pct(current, base));

        if hr_deviation_pct.is_none() && pace_deviation_pct.is_none() {
            debug!(
                baseline.count = baseline.count,
                "Neither heart rate nor pace comparable with baseline"
            );
            return ComparisonResult::insufficient(baseline.count);
        }

        let trend: TrendDirection = self.classifier.classify(hr_deviation_pct, pace_deviation_pct);

        debug!(
            baseline.count = baseline.count,
            hr_deviation_pct = ?hr_deviation_pct,
            pace_deviation_pct = ?pace_deviation_pct,
            trend = %trend,
            "Compared recent workout with baseline"
        );

        ComparisonResult {
            status: ComparisonStatus::Valid,
            baseline_count: baseline.count,
            hr_deviation_pct,
            pace_deviation_pct,
            trend,
        }
    }

    /// Similar workouts inside `[reference_time - lookback, reference_time)`
    ///
    /// The recent workout is excluded by position. A duplicate of it (same id
    /// and same start) is excluded too; other records sharing its id stay.
    pub fn baseline_pool<'a>(
        &self,
        recent: &RecentWorkoutAnalysis,
        activities: &'a [Activity],
        reference_time: DateTime<Utc>,
    ) -> Vec<&'a Activity> {
        let window_start = reference_time
            .checked_sub_signed(self.lookback)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        activities
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != recent.source_index)
            .filter(|(_, activity)| activity.sport_type == recent.activity.sport_type)
            .filter_map(|(_, activity)| {
                let (start, _) = activity.timing()?;
                let duplicate = activity.id == recent.activity.id && start == recent.start_date;
                (!duplicate && start >= window_start && start < reference_time).then_some(activity)
            })
            .collect()
    }

    /// Average heart rate and pace over the pool members reporting them
    pub fn summarize(pool: &[&Activity]) -> Baseline {
        let heart_rates: Vec<f64> = pool.iter().filter_map(|a| a.average_heart_rate).collect();
        let paces: Vec<f64> = pool.iter().filter_map(|a| a.pace_seconds_per_km()).collect();

        Baseline {
            count: pool.len(),
            average_heart_rate: mean(&heart_rates),
            average_pace_seconds_per_km: mean(&paces),
        }
    }
}

impl Default for BaselineComparator {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percent difference from baseline, rounded to one decimal
fn deviation_pct(current: f64, baseline: f64) -> Option<f64> {
    if baseline <= 0.0 || !baseline.is_finite() || !current.is_finite() {
        return None;
    }
    let pct = (current - baseline) / baseline * 100.0;
    Some((pct * 10.0).round() / 10.0)
}

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Selection of the most recent qualifying workout

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::RecentWorkoutAnalysis;
use crate::config::AnalysisConfig;
use crate::models::Activity;

/// Finds the latest workout inside the recency window
#[derive(Debug, Clone)]
pub struct RecentWorkoutLocator {
    recency_window: Duration,
    min_duration_seconds: u64,
}

impl RecentWorkoutLocator {
    /// Create a locator from analysis settings
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            recency_window: config.recency_window(),
            min_duration_seconds: config.min_duration_seconds,
        }
    }

    /// Locate the most recent qualifying workout
    ///
    /// A candidate started within `[reference_time - window, reference_time]`
    /// and lasted at least the minimum duration. The latest start wins; on
    /// identical start times the earlier record in `activities` wins.
    /// Structurally invalid records are skipped. `None` is a normal outcome.
    pub fn locate(
        &self,
        activities: &[Activity],
        reference_time: DateTime<Utc>,
    ) -> Option<RecentWorkoutAnalysis> {
        let window_start = reference_time
            .checked_sub_signed(self.recency_window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut best: Option<(usize, &Activity, DateTime<Utc>, u64)> = None;

        for (index, activity) in activities.iter().enumerate() {
            let Some((start, duration)) = activity.timing() else {
                warn!(
                    activity.index = index,
                    activity.id = %activity.id,
                    reason = activity.invalid_reason().unwrap_or("invalid"),
                    "Skipping structurally invalid activity"
                );
                continue;
            };

            if start < window_start || start > reference_time {
                continue;
            }
            if duration < self.min_duration_seconds {
                debug!(activity.id = %activity.id, duration, "Too short to count as a workout");
                continue;
            }

            // Strictly later only, so the first of equal timestamps is kept
            if best.map_or(true, |(_, _, best_start, _)| start > best_start) {
                best = Some((index, activity, start, duration));
            }
        }

        let (source_index, activity, start_date, duration_seconds) = best?;
        let hours_since_completion = (reference_time - start_date).num_hours().max(0) as u64;

        debug!(
            activity.id = %activity.id,
            hours_since_completion,
            "Located recent workout"
        );

        Some(RecentWorkoutAnalysis {
            activity: activity.clone(),
            source_index,
            start_date,
            duration_seconds,
            hours_since_completion,
            pace_seconds_per_km: activity.pace_seconds_per_km(),
        })
    }
}

impl Default for RecentWorkoutLocator {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

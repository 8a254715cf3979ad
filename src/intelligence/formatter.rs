// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Narrative rendering for the prompt builder
//!
//! Output is plain text: sentences, commas and one parenthetical metric
//! list. Metrics the activity does not report are left out rather than
//! shown as zero.

use super::{ComparisonResult, ComparisonStatus, PerformanceCondition, RecentWorkoutAnalysis};
use crate::config::AnalysisConfig;
use crate::constants::analysis::HOURS_PER_DAY;

/// Renders analysis results as a narrative
#[derive(Debug, Clone)]
pub struct AnalysisFormatter {
    recency_window_hours: i64,
    baseline_lookback_days: i64,
    min_baseline_workouts: usize,
    neutral_band_pct: f64,
}

impl AnalysisFormatter {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            recency_window_hours: config.recency_window_hours,
            baseline_lookback_days: config.baseline_lookback_days,
            min_baseline_workouts: config.min_baseline_workouts,
            neutral_band_pct: config.neutral_band_pct,
        }
    }

    /// Render the narrative for one analysis
    pub fn format(
        &self,
        recent: Option<&RecentWorkoutAnalysis>,
        comparison: &ComparisonResult,
        condition: PerformanceCondition,
    ) -> String {
        let Some(recent) = recent else {
            return self.no_recent_workout();
        };

        let mut parts = vec![self.describe_workout(recent)];

        match comparison.status {
            ComparisonStatus::Valid => {
                parts.push(self.describe_comparison(comparison));
                parts.push(format!("Trend: {}.", comparison.trend));
                parts.push(format!("Condition: {}.", condition));
            }
            ComparisonStatus::InsufficientData => {
                parts.push(self.describe_insufficient(comparison));
                let reason = if comparison.baseline_count < self.min_baseline_workouts {
                    "no baseline to compare against"
                } else {
                    "no comparable metrics"
                };
                parts.push(format!("Condition: {} ({}).", condition, reason));
            }
        }

        parts.join(" ")
    }

    /// Sentinel used when nothing qualifies as recent
    pub fn no_recent_workout(&self) -> String {
        format!("No recent workouts in last {} hours.", self.recency_window_hours)
    }

    fn describe_workout(&self, recent: &RecentWorkoutAnalysis) -> String {
        let activity = &recent.activity;
        let mut metrics = vec![format!("{} min", duration_minutes(recent.duration_seconds))];

        if let Some(hr) = activity.average_heart_rate {
            metrics.push(format!("avg HR {:.0} bpm", hr));
        }
        if let Some(effect) = activity.aerobic_training_effect {
            metrics.push(format!("aerobic training effect {:.1}", effect));
        }
        if let Some(pace) = recent.pace_seconds_per_km {
            metrics.push(format!("pace {}/km", format_pace(pace)));
        }

        let title = match activity.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!(" \"{}\"", name),
            _ => String::new(),
        };

        format!(
            "Most recent workout: {}{}, {} ({}).",
            activity.sport_type.display_name(),
            title,
            recency_phrase(recent.hours_since_completion),
            metrics.join(", ")
        )
    }

    fn describe_comparison(&self, comparison: &ComparisonResult) -> String {
        let mut findings = Vec::new();

        if let Some(hr) = comparison.hr_deviation_pct {
            findings.push(self.describe_deviation("heart rate", hr, "lower", "higher"));
        }
        if let Some(pace) = comparison.pace_deviation_pct {
            // Positive pace deviation means more seconds per km, i.e. slower
            findings.push(self.describe_deviation("pace", pace, "faster", "slower"));
        }

        format!(
            "Compared with {} similar {} from the last {} days: {}.",
            comparison.baseline_count,
            plural(comparison.baseline_count, "workout", "workouts"),
            self.baseline_lookback_days,
            findings.join(", ")
        )
    }

    fn describe_deviation(&self, metric: &str, deviation_pct: f64, below: &str, above: &str) -> String {
        if deviation_pct.abs() <= self.neutral_band_pct {
            return format!("{} in line with baseline ({:+.1}%)", metric, deviation_pct);
        }
        let direction = if deviation_pct < 0.0 { below } else { above };
        format!("{} {:.1}% {} than baseline", metric, deviation_pct.abs(), direction)
    }

    fn describe_insufficient(&self, comparison: &ComparisonResult) -> String {
        if comparison.baseline_count < self.min_baseline_workouts {
            format!(
                "Not enough history to establish a trend: found {} similar {} in the last {} days, need at least {}.",
                comparison.baseline_count,
                plural(comparison.baseline_count, "workout", "workouts"),
                self.baseline_lookback_days,
                self.min_baseline_workouts
            )
        } else {
            format!(
                "Not enough history to establish a trend: {} similar {} in the last {} days, but no heart rate or pace data to compare.",
                comparison.baseline_count,
                plural(comparison.baseline_count, "workout", "workouts"),
                self.baseline_lookback_days
            )
        }
    }
}

impl Default for AnalysisFormatter {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

/// "N hours ago" under a day, "N days ago" otherwise
pub fn recency_phrase(hours_since_completion: u64) -> String {
    if hours_since_completion < HOURS_PER_DAY {
        format!(
            "{} {} ago",
            hours_since_completion,
            plural(hours_since_completion as usize, "hour", "hours")
        )
    } else {
        let days = hours_since_completion / HOURS_PER_DAY;
        format!("{} {} ago", days, plural(days as usize, "day", "days"))
    }
}

/// Pace as minutes:seconds
pub fn format_pace(seconds_per_km: f64) -> String {
    let total = seconds_per_km.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn duration_minutes(duration_seconds: u64) -> u64 {
    (duration_seconds as f64 / 60.0).round() as u64
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::TrendDirection;
    use crate::models::{Activity, SportType};
    use chrono::{Duration, TimeZone, Utc};

    fn recent_run(hours_ago: u64) -> RecentWorkoutAnalysis {
        let reference = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
        let start = reference - Duration::hours(hours_ago as i64);
        let mut activity = Activity::new("r1", SportType::Running, start, 3000);
        activity.average_heart_rate = Some(143.0);
        activity.aerobic_training_effect = Some(4.0);

        RecentWorkoutAnalysis {
            pace_seconds_per_km: activity.pace_seconds_per_km(),
            activity,
            source_index: 0,
            start_date: start,
            duration_seconds: 3000,
            hours_since_completion: hours_ago,
        }
    }

    fn valid_comparison(hr: Option<f64>, pace: Option<f64>, trend: TrendDirection) -> ComparisonResult {
        ComparisonResult {
            status: ComparisonStatus::Valid,
            baseline_count: 3,
            hr_deviation_pct: hr,
            pace_deviation_pct: pace,
            trend,
        }
    }

    #[test]
    fn test_no_recent_workout_sentinel() {
        let formatter = AnalysisFormatter::default();
        let text = formatter.format(None, &ComparisonResult::insufficient(0), PerformanceCondition::Normal);

        assert_eq!(text, "No recent workouts in last 72 hours.");
    }

    #[test]
    fn test_recency_phrasing() {
        assert_eq!(recency_phrase(0), "0 hours ago");
        assert_eq!(recency_phrase(1), "1 hour ago");
        assert_eq!(recency_phrase(23), "23 hours ago");
        assert_eq!(recency_phrase(24), "1 day ago");
        assert_eq!(recency_phrase(71), "2 days ago");
    }

    #[test]
    fn test_pace_formatting() {
        assert_eq!(format_pace(300.0), "5:00");
        assert_eq!(format_pace(318.4), "5:18");
        assert_eq!(format_pace(359.6), "6:00");
    }

    #[test]
    fn test_metrics_present_are_listed_and_absent_omitted() {
        let formatter = AnalysisFormatter::default();
        let recent = recent_run(0);
        let text = formatter.format(
            Some(&recent),
            &ComparisonResult::insufficient(0),
            PerformanceCondition::Normal,
        );

        assert!(text.starts_with("Most recent workout: run, 0 hours ago (50 min, avg HR 143 bpm, aerobic training effect 4.0)."));
        assert!(!text.contains("pace"));
        assert!(!text.contains(" 0 bpm"));
    }

    #[test]
    fn test_pace_and_name_rendered_when_available() {
        let formatter = AnalysisFormatter::default();
        let mut recent = recent_run(30);
        recent.activity.name = Some("Tempo Tuesday".to_string());
        recent.activity.average_heart_rate = None;
        recent.activity.aerobic_training_effect = None;
        recent.pace_seconds_per_km = Some(300.0);

        let text = formatter.format(
            Some(&recent),
            &ComparisonResult::insufficient(1),
            PerformanceCondition::Normal,
        );

        assert!(text.contains("run \"Tempo Tuesday\", 1 day ago (50 min, pace 5:00/km)."));
        assert!(!text.contains("HR"));
    }

    #[test]
    fn test_insufficient_history_is_stated() {
        let formatter = AnalysisFormatter::default();
        let text = formatter.format(
            Some(&recent_run(2)),
            &ComparisonResult::insufficient(1),
            PerformanceCondition::Normal,
        );

        assert!(text.contains("Not enough history to establish a trend: found 1 similar workout in the last 14 days, need at least 2."));
        assert!(text.ends_with("Condition: normal (no baseline to compare against)."));
        assert!(!text.contains("Trend:"));
    }

    #[test]
    fn test_insufficient_for_missing_metrics_is_stated() {
        let formatter = AnalysisFormatter::default();
        let text = formatter.format(
            Some(&recent_run(2)),
            &ComparisonResult::insufficient(4),
            PerformanceCondition::Normal,
        );

        assert!(text.contains("4 similar workouts in the last 14 days, but no heart rate or pace data to compare."));
        assert!(text.ends_with("Condition: normal (no comparable metrics)."));
        assert!(!text.contains("no baseline to compare against"));
    }

    #[test]
    fn test_valid_comparison_narrative() {
        let formatter = AnalysisFormatter::default();
        let comparison = valid_comparison(Some(-6.0), Some(2.1), TrendDirection::Improving);
        let text = formatter.format(Some(&recent_run(5)), &comparison, PerformanceCondition::Strong);

        assert!(text.contains(
            "Compared with 3 similar workouts from the last 14 days: heart rate 6.0% lower than baseline, pace in line with baseline (+2.1%)."
        ));
        assert!(text.contains("Trend: improving."));
        assert!(text.ends_with("Condition: strong."));
    }

    #[test]
    fn test_slower_pace_wording() {
        let formatter = AnalysisFormatter::default();
        let comparison = valid_comparison(None, Some(6.0), TrendDirection::Declining);
        let text = formatter.format(Some(&recent_run(5)), &comparison, PerformanceCondition::Fatigued);

        assert!(text.contains("pace 6.0% slower than baseline"));
        assert!(text.contains("Trend: declining."));
        assert!(text.contains("Condition: fatigued."));
    }

    #[test]
    fn test_format_is_deterministic() {
        let formatter = AnalysisFormatter::default();
        let recent = recent_run(5);
        let comparison = valid_comparison(Some(1.0), None, TrendDirection::Stable);

        let first = formatter.format(Some(&recent), &comparison, PerformanceCondition::Normal);
        let second = formatter.format(Some(&recent), &comparison, PerformanceCondition::Normal);
        assert_eq!(first, second);
    }
}

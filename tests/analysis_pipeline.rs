// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pipeline integration tests
//!
//! These tests feed activity documents through ingest and the analyzer and
//! check the report and narrative the prompt builder would receive.

use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::io::Write;
use tempfile::NamedTempFile;
use workout_insight::config::{AnalysisConfig, FitnessConfig};
use workout_insight::ingest::{self, IngestError};
use workout_insight::intelligence::{
    ComparisonStatus, PerformanceCondition, SignalPrecedence, TrendDirection, WorkoutAnalyzer,
};
use workout_insight::models::{Activity, SportType};

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap()
}

fn analyzer() -> WorkoutAnalyzer {
    WorkoutAnalyzer::new(AnalysisConfig::default()).unwrap()
}

const HISTORY: &str = r#"[
  {
    "id": "a1",
    "name": "Evening Run",
    "type": "Run",
    "start_timestamp": "2025-03-10T16:00:00Z",
    "duration_seconds": 3000,
    "distance_meters": 10000.0,
    "avg_heart_rate_bpm": 140,
    "aerobic_training_effect": 3.8
  },
  {
    "id": "a2",
    "type": "Run",
    "start_timestamp": "2025-03-05T07:00:00Z",
    "duration_seconds": 3000,
    "distance_meters": 10000.0,
    "avg_heart_rate_bpm": 150
  },
  {
    "id": "a3",
    "type": "TrailRun",
    "start_timestamp": "2025-03-01T07:00:00Z",
    "duration_seconds": 3060,
    "distance_meters": 10000.0,
    "avg_heart_rate_bpm": 152
  },
  {
    "id": "a4",
    "type": "Ride",
    "start_timestamp": "2025-03-09T10:00:00Z",
    "duration_seconds": 5400,
    "avg_heart_rate_bpm": 130
  },
  {
    "id": "a5",
    "type": "Run",
    "start_timestamp": "2025-02-20T07:00:00Z",
    "duration_seconds": 3000,
    "distance_meters": 10000.0,
    "avg_heart_rate_bpm": 120
  },
  {
    "id": "broken",
    "type": "Run",
    "duration_seconds": 3600
  }
]"#;

#[test]
fn test_history_document_to_narrative() -> Result<()> {
    let activities = ingest::parse_activities(HISTORY, &FitnessConfig::default())?;
    assert_eq!(activities.len(), 6);

    let report = analyzer().analyze(&activities, reference_time());

    let recent = report.recent.as_ref().expect("recent workout");
    assert_eq!(recent.activity.id, "a1");
    assert_eq!(recent.hours_since_completion, 2);

    // Only a2 and a3 are runs inside the lookback window
    assert_eq!(report.comparison.status, ComparisonStatus::Valid);
    assert_eq!(report.comparison.baseline_count, 2);
    assert_eq!(report.comparison.hr_deviation_pct, Some(-7.3));
    assert_eq!(report.comparison.pace_deviation_pct, Some(-1.0));
    assert_eq!(report.comparison.trend, TrendDirection::Improving);
    assert_eq!(report.condition, PerformanceCondition::Strong);

    assert_eq!(
        report.narrative,
        "Most recent workout: run \"Evening Run\", 2 hours ago (50 min, avg HR 140 bpm, \
         aerobic training effect 3.8, pace 5:00/km). Compared with 2 similar workouts from \
         the last 14 days: heart rate 7.3% lower than baseline, pace in line with baseline \
         (-1.0%). Trend: improving. Condition: strong."
    );

    Ok(())
}

#[test]
fn test_history_file_round_trip_through_disk() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(HISTORY.as_bytes())?;

    let activities = ingest::load_activities(file.path(), &FitnessConfig::default())?;
    let report = analyzer().analyze(&activities, reference_time());

    assert_eq!(report.condition, PerformanceCondition::Strong);
    Ok(())
}

#[test]
fn test_malformed_document_is_rejected() {
    let json = r#"[{"id": "x", "type": "Run", "start_timestamp": "2025-03-10T16:00:00Z",
                   "duration_seconds": 3000, "avg_heart_rate_bpm": "high"}]"#;

    let err = ingest::parse_activities(json, &FitnessConfig::default()).unwrap_err();
    assert!(matches!(err, IngestError::Malformed { .. }));
}

#[test]
fn test_empty_history_yields_sentinel() {
    let activities = ingest::parse_activities("[]", &FitnessConfig::default()).unwrap();
    let report = analyzer().analyze(&activities, reference_time());

    assert!(report.recent.is_none());
    assert_eq!(report.condition, PerformanceCondition::Normal);
    assert_eq!(report.narrative, "No recent workouts in last 72 hours.");
}

#[test]
fn test_window_edges_are_inclusive() {
    let at_reference = Activity::new("now", SportType::Running, reference_time(), 600);
    let report = analyzer().analyze(&[at_reference], reference_time());
    assert_eq!(report.recent.map(|r| r.hours_since_completion), Some(0));

    let at_edge = Activity::new("edge", SportType::Running, reference_time() - Duration::hours(72), 600);
    let report = analyzer().analyze(&[at_edge], reference_time());
    assert!(report.recent.is_some());

    let past_edge = Activity::new(
        "old",
        SportType::Running,
        reference_time() - Duration::hours(72) - Duration::seconds(1),
        600,
    );
    let report = analyzer().analyze(&[past_edge], reference_time());
    assert!(report.recent.is_none());
}

#[test]
fn test_future_and_short_workouts_never_selected() {
    let activities = vec![
        Activity::new("future", SportType::Running, reference_time() + Duration::hours(1), 3600),
        Activity::new("short", SportType::Running, reference_time() - Duration::hours(1), 299),
        Activity::new("ok", SportType::Cycling, reference_time() - Duration::hours(30), 300),
    ];

    let report = analyzer().analyze(&activities, reference_time());
    let recent = report.recent.expect("cycling session qualifies");
    assert_eq!(recent.activity.id, "ok");
    assert!(report.narrative.contains("bike ride, 1 day ago"));
}

#[test]
fn test_single_prior_workout_is_insufficient() {
    let mut recent = Activity::new("r", SportType::Running, reference_time() - Duration::hours(4), 2400);
    recent.average_heart_rate = Some(150.0);
    let mut prior = Activity::new("p", SportType::Running, reference_time() - Duration::days(3), 2400);
    prior.average_heart_rate = Some(120.0);

    let report = analyzer().analyze(&[recent, prior], reference_time());

    assert_eq!(report.comparison.status, ComparisonStatus::InsufficientData);
    assert_eq!(report.comparison.baseline_count, 1);
    assert_eq!(report.comparison.trend, TrendDirection::Unknown);
    assert_eq!(report.condition, PerformanceCondition::Normal);
    assert!(report.narrative.contains("need at least 2"));
}

#[test]
fn test_conflicting_signals_follow_precedence() {
    let run = |id: &str, ago: Duration, hr: f64, seconds: u64| {
        let mut activity = Activity::new(id, SportType::Running, reference_time() - ago, seconds);
        activity.distance_meters = Some(10000.0);
        activity.average_heart_rate = Some(hr);
        activity
    };

    // Heart rate 10% lower, pace 10% slower
    let activities = vec![
        run("recent", Duration::hours(2), 126.0, 3300),
        run("p1", Duration::days(2), 140.0, 3000),
        run("p2", Duration::days(6), 140.0, 3000),
    ];

    let by_heart_rate = analyzer().analyze(&activities, reference_time());
    assert_eq!(by_heart_rate.comparison.trend, TrendDirection::Improving);
    assert_eq!(by_heart_rate.condition, PerformanceCondition::Strong);

    let pace_first = WorkoutAnalyzer::new(AnalysisConfig {
        signal_precedence: SignalPrecedence::Pace,
        ..AnalysisConfig::default()
    })
    .unwrap();
    let by_pace = pace_first.analyze(&activities, reference_time());
    assert_eq!(by_pace.comparison.trend, TrendDirection::Declining);
    assert_eq!(by_pace.condition, PerformanceCondition::Fatigued);
}

#[test]
fn test_report_is_identical_across_runs() -> Result<()> {
    let activities = ingest::parse_activities(HISTORY, &FitnessConfig::default())?;
    let analyzer = analyzer();

    let first = analyzer.analyze(&activities, reference_time());
    let second = analyzer.analyze(&activities, reference_time());

    assert_eq!(first, second);
    assert_eq!(serde_json::to_string(&first)?, serde_json::to_string(&second)?);
    Ok(())
}

// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Workout Insight
//!
//! Individual-session performance analysis over an athlete's workout history.
//! Given already-fetched activity records and an explicit reference time, the
//! crate finds the most recent qualifying workout, compares it with similar
//! workouts from the preceding two weeks, classifies the athlete's condition
//! and trend, and renders a plain-text narrative for an AI-facing prompt.
//!
//! ## Pipeline
//!
//! - **Locator**: picks the latest workout in the recency window
//! - **Comparator**: builds a same-sport baseline and computes deviations
//! - **Classifier**: maps deviations to Strong / Normal / Fatigued
//! - **Formatter**: renders the narrative consumed by the prompt builder
//!
//! Every stage is a pure function of its inputs and the configured
//! thresholds. Nothing here reads a clock, touches the network or persists
//! data.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, TimeZone, Utc};
//! use workout_insight::config::AnalysisConfig;
//! use workout_insight::intelligence::WorkoutAnalyzer;
//! use workout_insight::models::{Activity, SportType};
//!
//! let now = Utc.with_ymd_and_hms(2025, 3, 10, 18, 0, 0).unwrap();
//! let mut run = Activity::new("a1", SportType::Running, now - Duration::minutes(50), 3000);
//! run.average_heart_rate = Some(143.0);
//!
//! let analyzer = WorkoutAnalyzer::new(AnalysisConfig::default()).unwrap();
//! let report = analyzer.analyze(&[run], now);
//! assert!(report.narrative.contains("0 hours ago"));
//! ```

/// Common data models for workout history
pub mod models;

/// Configuration management: thresholds, windows and sport mappings
pub mod config;

/// Default analysis constants and environment variable names
pub mod constants;

/// Recent-workout analysis engine
pub mod intelligence;

/// JSON boundary for activity history documents
pub mod ingest;

/// Structured logging setup
pub mod logging;

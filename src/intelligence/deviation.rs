// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared deviation classification
//!
//! One decision rule turns heart-rate and pace deviations into a
//! better / neutral / worse outcome. The trend step and the condition step
//! both go through it and only differ in the labels they attach to each
//! outcome, so the two classifications cannot drift apart.
//!
//! Deviations are percentages where positive means worse: a higher heart
//! rate, or a slower pace (more seconds per kilometer).
//!
//! ## Boundary handling
//!
//! Each deviation is rounded to the nearest whole percent (half away from
//! zero) before comparison. With the default thresholds that makes ±5.4
//! neutral and ±5.5 extreme; exactly ±5 is neutral and exactly ±6 is extreme.
//! Magnitudes below the extreme threshold are neutral, which also covers any
//! gap left by a custom `neutral_band_pct` / `extreme_threshold_pct` pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::AnalysisConfig;

/// Direction a single deviation, or a combination of them, points in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationOutcome {
    Better,
    Neutral,
    Worse,
}

/// Tie-break when heart rate and pace are extreme in opposite directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalPrecedence {
    /// Heart rate is the primary physiological signal
    #[default]
    HeartRate,
    /// Pace wins
    Pace,
    /// Conflicting extremes cancel out
    Neutral,
}

impl fmt::Display for SignalPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SignalPrecedence::HeartRate => "heart_rate",
            SignalPrecedence::Pace => "pace",
            SignalPrecedence::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

impl FromStr for SignalPrecedence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heart_rate" | "hr" => Ok(SignalPrecedence::HeartRate),
            "pace" => Ok(SignalPrecedence::Pace),
            "neutral" => Ok(SignalPrecedence::Neutral),
            other => Err(format!(
                "unknown signal precedence '{}', expected heart_rate, pace or neutral",
                other
            )),
        }
    }
}

/// Threshold rule shared by the trend and condition classifications
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationClassifier {
    extreme_threshold_pct: f64,
    precedence: SignalPrecedence,
}

impl DeviationClassifier {
    /// Create a classifier with an explicit threshold and tie-break
    pub fn new(extreme_threshold_pct: f64, precedence: SignalPrecedence) -> Self {
        Self {
            extreme_threshold_pct,
            precedence,
        }
    }

    /// Create a classifier from analysis settings
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.extreme_threshold_pct, config.signal_precedence)
    }

    /// Classify one deviation on its own
    pub fn signal(&self, deviation_pct: f64) -> DeviationOutcome {
        let rounded = deviation_pct.round();
        if rounded <= -self.extreme_threshold_pct {
            DeviationOutcome::Better
        } else if rounded >= self.extreme_threshold_pct {
            DeviationOutcome::Worse
        } else {
            DeviationOutcome::Neutral
        }
    }

    /// Combine the available deviations into one outcome
    ///
    /// Either extreme wins over a neutral reading. With a single deviation
    /// that one decides; with none the outcome is neutral.
    pub fn outcome(&self, hr_deviation_pct: Option<f64>, pace_deviation_pct: Option<f64>) -> DeviationOutcome {
        let hr = hr_deviation_pct.map(|d| self.signal(d));
        let pace = pace_deviation_pct.map(|d| self.signal(d));

        match (hr, pace) {
            (None, None) => DeviationOutcome::Neutral,
            (Some(only), None) | (None, Some(only)) => only,
            (Some(hr), Some(pace)) => self.combine(hr, pace),
        }
    }

    /// Classify into a caller-chosen label vocabulary
    pub fn classify<L>(&self, hr_deviation_pct: Option<f64>, pace_deviation_pct: Option<f64>) -> L
    where
        L: From<DeviationOutcome>,
    {
        L::from(self.outcome(hr_deviation_pct, pace_deviation_pct))
    }

    fn combine(&self, hr: DeviationOutcome, pace: DeviationOutcome) -> DeviationOutcome {
        use DeviationOutcome::*;

        match (hr, pace) {
            (Better, Worse) | (Worse, Better) => match self.precedence {
                SignalPrecedence::HeartRate => hr,
                SignalPrecedence::Pace => pace,
                SignalPrecedence::Neutral => Neutral,
            },
            (Neutral, other) => other,
            (other, _) => other,
        }
    }
}

impl Default for DeviationClassifier {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

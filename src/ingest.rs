// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! JSON boundary for activity history documents
//!
//! A document is a JSON array of records:
//!
//! ```json
//! [
//!   {
//!     "id": "9812",
//!     "name": "Lunch Run",
//!     "type": "Run",
//!     "start_timestamp": "2025-03-10T12:05:00Z",
//!     "duration_seconds": 3000,
//!     "distance_meters": 10000.0,
//!     "avg_heart_rate_bpm": 143,
//!     "aerobic_training_effect": 4.0
//!   }
//! ]
//! ```
//!
//! A record without `start_timestamp` or `duration_seconds` is accepted and
//! later skipped by the analysis. A field of the wrong kind (text where a
//! number belongs, a negative duration) means the upstream collaborator is
//! broken, and the whole document is rejected.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FitnessConfig;
use crate::logging::AppLogger;
use crate::models::{Activity, SportType};

/// Errors raised at the ingest boundary
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to read activity file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed activity document at line {line}, column {column}: {source}")]
    Malformed {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for IngestError {
    fn from(source: serde_json::Error) -> Self {
        IngestError::Malformed {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}

/// One record as written by the data-access layer
///
/// Keys outside this set (calories, elevation, ...) are ignored.
#[derive(Debug, Deserialize)]
struct ActivityRecord {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type")]
    activity_type: Option<String>,
    start_timestamp: Option<DateTime<Utc>>,
    duration_seconds: Option<u64>,
    distance_meters: Option<f64>,
    avg_heart_rate_bpm: Option<f64>,
    aerobic_training_effect: Option<f64>,
}

impl ActivityRecord {
    fn into_activity(self, index: usize, config: &FitnessConfig) -> Activity {
        let sport_type = self
            .activity_type
            .as_deref()
            .map(|t| SportType::from_provider_string(t, config))
            .unwrap_or(SportType::Other);

        let activity = Activity {
            id: self.id.unwrap_or_else(|| format!("record-{}", index)),
            name: self.name,
            sport_type,
            start_date: self.start_timestamp,
            duration_seconds: self.duration_seconds,
            distance_meters: self.distance_meters,
            average_heart_rate: self.avg_heart_rate_bpm,
            aerobic_training_effect: self.aerobic_training_effect,
        };

        if let Some(reason) = activity.invalid_reason() {
            AppLogger::log_record_issue(index, &activity.id, reason);
        }

        activity
    }
}

/// Parse an activity history document
pub fn parse_activities(json: &str, config: &FitnessConfig) -> Result<Vec<Activity>, IngestError> {
    let records: Vec<ActivityRecord> = serde_json::from_str(json)?;

    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_activity(index, config))
        .collect())
}

/// Read and parse an activity history file
pub fn load_activities(path: impl AsRef<Path>, config: &FitnessConfig) -> Result<Vec<Activity>, IngestError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_activities(&content, config)
}

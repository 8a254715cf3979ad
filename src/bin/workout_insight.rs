// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Workout Insight CLI
//!
//! Analyses an activity history file and prints the narrative (or the full
//! report as JSON) for the most recent workout.
//!
//! ```bash
//! workout-insight --activities history.json --now 2025-03-10T18:00:00Z
//! workout-insight --activities history.json --output json
//! ```
//!
//! When `--now` is omitted the wall clock is read here, at the edge. The
//! library itself only ever sees the explicit reference time.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing::info;

use workout_insight::config::FitnessConfig;
use workout_insight::ingest;
use workout_insight::intelligence::WorkoutAnalyzer;
use workout_insight::logging::{self, AppLogger};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Narrative only
    Text,
    /// Full structured report
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the activity history
    #[arg(short, long)]
    activities: String,

    /// Reference time (RFC 3339); defaults to now
    #[arg(short, long)]
    now: Option<DateTime<Utc>>,

    /// TOML config file with sport mappings and thresholds
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_from_env()?;

    let args = Args::parse();

    let config_source = args
        .config
        .clone()
        .unwrap_or_else(|| "INSIGHT_CONFIG_PATH, ./workout_insight.toml or defaults".to_string());
    let mut fitness_config = FitnessConfig::load(args.config)?;
    fitness_config.analysis.apply_env_overrides()?;
    AppLogger::log_config_loaded(&config_source, &fitness_config.analysis.summary());

    let activities = ingest::load_activities(&args.activities, &fitness_config)
        .with_context(|| format!("Could not load activities from {}", args.activities))?;
    info!(count = activities.len(), "Loaded activity history");

    let reference_time = args.now.unwrap_or_else(Utc::now);
    let analyzer = WorkoutAnalyzer::new(fitness_config.analysis)?;
    let report = analyzer.analyze(&activities, reference_time);

    match args.output {
        OutputFormat::Text => println!("{}", report.narrative),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

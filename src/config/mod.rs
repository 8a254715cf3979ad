// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for workout analysis
//!
//! Values resolve in three layers: built-in defaults, an optional TOML file,
//! then `INSIGHT_*` environment overrides.

pub mod environment;
pub mod fitness_config;

pub use fitness_config::{AnalysisConfig, FitnessConfig};

//! Command-line interface for LaneSim
//!
//! Every flag overrides the matching value from the JSON config file.

use clap::Parser;
use std::path::PathBuf;

use crate::headless::HeadlessBattleConfig;

/// Lane combat battle simulator
#[derive(Parser, Debug)]
#[command(name = "lanesim")]
#[command(about = "Lane combat battle simulator (headless)")]
#[command(version)]
pub struct Args {
    /// JSON battle config file (built-in defaults when omitted)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Output path for the JSON battle report
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum battle duration in seconds
    #[arg(long)]
    pub max_duration: Option<f32>,

    /// Random seed for a reproducible battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lane presets in RON format
    #[arg(long, value_name = "RON_FILE")]
    pub lane_config: Option<PathBuf>,

    /// Disable automatic enemy waves
    #[arg(long)]
    pub no_waves: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Fold command-line overrides into a loaded config
    pub fn apply_overrides(&self, config: &mut HeadlessBattleConfig) {
        if let Some(output) = &self.output {
            config.output_path = Some(output.display().to_string());
        }
        if let Some(max_duration) = self.max_duration {
            config.max_duration_secs = max_duration;
        }
        if let Some(seed) = self.seed {
            config.random_seed = Some(seed);
        }
        if let Some(lane_config) = &self.lane_config {
            config.lane_config_path = Some(lane_config.display().to_string());
        }
        if self.no_waves {
            config.enemy_waves = false;
        }
    }
}

pub fn parse_args() -> Args {
    Args::parse()
}

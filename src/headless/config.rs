//! JSON configuration parsing for headless mode
//!
//! Parses JSON battle configurations: which heroes to deploy, whether the
//! economy is upgraded automatically, and how long the battle may run.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::lane::HeroRole;

/// Headless battle configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessBattleConfig {
    /// Hero roles to deploy, cycled in order whenever the next one is affordable
    #[serde(default = "default_deploy_plan")]
    pub deploy_plan: Vec<String>,
    /// Buy an energy upgrade whenever the pool is full (default: true)
    #[serde(default = "default_true")]
    pub auto_upgrade: bool,
    /// Let the simulation spawn enemies on its own (default: true)
    #[serde(default = "default_true")]
    pub enemy_waves: bool,
    /// Maximum battle duration in seconds before declaring a draw (default: 180)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Simulation ticks per second of battle time (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_hz: f32,
    /// Random seed for deterministic battle reproduction
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Lane presets file; the built-in presets are used when absent
    #[serde(default)]
    pub lane_config_path: Option<String>,
    /// Where to write the JSON battle report (optional)
    #[serde(default)]
    pub output_path: Option<String>,
}

fn default_deploy_plan() -> Vec<String> {
    ["Warrior", "Archer", "Healer", "Mage"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_max_duration() -> f32 {
    180.0
}

fn default_tick_rate() -> f32 {
    60.0
}

impl Default for HeadlessBattleConfig {
    fn default() -> Self {
        Self {
            deploy_plan: default_deploy_plan(),
            auto_upgrade: true,
            enemy_waves: true,
            max_duration_secs: default_max_duration(),
            tick_rate_hz: default_tick_rate(),
            random_seed: None,
            lane_config_path: None,
            output_path: None,
        }
    }
}

impl HeadlessBattleConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: HeadlessBattleConfig = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.deploy_roles()?;

        if !(self.max_duration_secs > 0.0) {
            return Err("max_duration_secs must be positive".to_string());
        }
        if !(self.tick_rate_hz > 0.0 && self.tick_rate_hz <= 1000.0) {
            return Err(format!(
                "tick_rate_hz must be within (0, 1000], got {}",
                self.tick_rate_hz
            ));
        }

        Ok(())
    }

    /// Parse the deploy plan into hero roles
    pub fn deploy_roles(&self) -> Result<Vec<HeroRole>, String> {
        self.deploy_plan
            .iter()
            .map(|name| {
                HeroRole::parse(name).ok_or_else(|| {
                    format!(
                        "Unknown hero role: '{}'. Valid roles: Archer, Warrior, Mage, Healer",
                        name
                    )
                })
            })
            .collect()
    }

    /// Seconds of battle time per tick
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}

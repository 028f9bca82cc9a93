//! Headless mode for automated battles
//!
//! This module runs lane battles without any graphical output, suitable for
//! automated testing, balance checks and AI agent integration.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless battle
//! cargo run --release -- --config battle.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "deploy_plan": ["Warrior", "Healer", "Archer", "Mage"],
//!   "auto_upgrade": true,
//!   "max_duration_secs": 120,
//!   "random_seed": 42
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::HeadlessBattleConfig;
pub use runner::{build_headless_app, run_headless_battle, run_to_completion, BattleResult};

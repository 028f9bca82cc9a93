//! LaneSim - Lane Combat Simulation
//!
//! A lane battle simulator: player heroes advance on the enemy stronghold
//! while enemy waves advance on the player's, trading attacks and skills.
//!
//! This library exposes the engine-free simulation core (`lane`) and the
//! Bevy-driven headless runner built around it.

pub mod cli;
pub mod combat;
pub mod headless;
pub mod lane;

// Re-export commonly used types
pub use combat::analytics::{AnalyticsSnapshot, BattleAnalytics};
pub use combat::log::{CombatLog, CombatLogEventType};
pub use headless::{BattleResult, HeadlessBattleConfig};
pub use lane::{SimError, SimEvent, Simulation};

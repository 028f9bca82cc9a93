//! Lane Combat Simulation Core
//!
//! Engine-free simulation of a lane encounter: player heroes march right toward
//! the enemy stronghold while enemy slimes march left toward the player's.
//!
//! ## Module Structure
//!
//! - `cooldown`: the shared "ready at time T" gate
//! - `attack`: direct-damage resolver and the `Damageable` capability
//! - `skill`: probability-gated skills and their effects
//! - `projectile`: straight-line projectiles with a one-shot payload
//! - `unit` / `stronghold`: the simulated bodies
//! - `targeting`: per-role target selection
//! - `economy`: the energy resource gating deployment
//! - `simulation`: the per-tick orchestrator (`Simulation::advance_tick`)
//!
//! The core never samples a clock. Every operation that depends on time takes
//! the tick's captured `now` so one tick always compares against one instant.

pub mod attack;
pub mod constants;
pub mod cooldown;
pub mod economy;
pub mod error;
pub mod events;
pub mod projectile;
pub mod rng;
pub mod roles;
pub mod simulation;
pub mod skill;
pub mod stronghold;
pub mod targeting;
pub mod unit;
pub mod unit_config;

/// Simulation time in seconds.
pub type Timestamp = f32;

pub use attack::{Attack, BuffState, DamageOutcome, Damageable};
pub use cooldown::{ready, CooldownGate};
pub use economy::{Economy, EconomySnapshot};
pub use error::SimError;
pub use events::{BattleOutcome, DamageCause, SimEvent};
pub use projectile::{Projectile, ProjectileId, ProjectilePayload, ProjectileStep};
pub use rng::GameRng;
pub use roles::{EnemyVariant, HeroRole, Role, Side, SkillTargeting};
pub use simulation::{Simulation, ENEMY_BASE_ID};
pub use skill::{EffectContext, EffectImpact, Skill, SkillEffect, SkillSlot};
pub use stronghold::{BaseTarget, Stronghold};
pub use targeting::TargetingRules;
pub use unit::{Unit, UnitId, UnitState};
pub use unit_config::{
    load_lane_config, EconomyConfig, HeroPreset, LaneConfig, LaneTuning, SkillPreset, UnitPreset,
    DEFAULT_LANE_CONFIG_PATH,
};

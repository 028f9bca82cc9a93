//! Lane Tuning Constants
//!
//! Centralized defaults for the magic numbers of the lane simulation.
//! Everything here can be overridden from `assets/config/lane.ron` through
//! `LaneTuning` / `EconomyConfig`; these values are what the built-in
//! configuration uses.

// ============================================================================
// Lane Geometry
// ============================================================================

/// Length of the lane along the x axis.
pub const LANE_WIDTH: f32 = 1280.0;

/// Resting y coordinate of units walking the lane.
pub const LANE_Y: f32 = 360.0;

/// Where newly deployed heroes appear.
pub const HERO_SPAWN_X: f32 = 50.0;

/// Enemies appear this far in from the right edge of the lane.
pub const ENEMY_SPAWN_OFFSET: f32 = 50.0;

/// x coordinate of the player's stronghold.
pub const PLAYER_STRONGHOLD_X: f32 = 10.0;

/// The enemy stronghold sits this far in from the right edge of the lane.
pub const ENEMY_STRONGHOLD_OFFSET: f32 = 60.0;

/// The attackable stronghold proxy stands this far in front of the structure.
pub const STRONGHOLD_PROXY_OFFSET: f32 = 20.0;

/// Starting health of both strongholds.
pub const STRONGHOLD_HEALTH: f32 = 100.0;

/// Enemies at or left of this x have breached the player's stronghold.
pub const BREACH_X: f32 = 50.0;

/// Damage a breaching enemy deals to the player's stronghold.
pub const BREACH_DAMAGE: f32 = 5.0;

// ============================================================================
// Targeting
// ============================================================================

/// Heroes only engage enemies within this many units vertically.
pub const VERTICAL_TOLERANCE: f32 = 40.0;

/// Enemies measure their reach against a hero's center, this far right of its x.
pub const HERO_CENTER_OFFSET: f32 = 20.0;

// ============================================================================
// Attacks & Projectiles
// ============================================================================

/// Attack-speed buffs never push an attack cooldown below this.
pub const MIN_ATTACK_COOLDOWN: f32 = 0.1;

/// A projectile has arrived once it is closer than this on BOTH axes.
pub const ARRIVAL_TOLERANCE: f32 = 5.0;

/// Distance a projectile covers per tick.
pub const PROJECTILE_SPEED: f32 = 4.0;

/// Projectiles that travel further than this from their origin expire.
pub const PROJECTILE_MAX_RANGE: f32 = 300.0;

// ============================================================================
// Economy
// ============================================================================

pub const STARTING_ENERGY: f32 = 100.0;
pub const STARTING_MAX_ENERGY: f32 = 100.0;

/// Energy regained per tick.
pub const STARTING_REGEN_RATE: f32 = 0.1;

pub const MAX_UPGRADE_CLICKS: u32 = 5;
pub const UPGRADE_BASE_COST: f32 = 20.0;
pub const UPGRADE_COST_STEP: f32 = 10.0;
pub const UPGRADE_MAX_ENERGY_STEP: f32 = 10.0;
pub const UPGRADE_REGEN_STEP: f32 = 0.01;

// ============================================================================
// Enemy Waves
// ============================================================================

/// Bounds (seconds) of the uniformly drawn delay between automatic enemy spawns.
pub const ENEMY_SPAWN_INTERVAL_MIN: f32 = 0.5;
pub const ENEMY_SPAWN_INTERVAL_MAX: f32 = 2.0;

//! Simulation Events
//!
//! Everything observable about a tick is reported as a `SimEvent`. The core
//! only queues them; logging, analytics and rendering live with whoever
//! drains them.

use bevy::prelude::Event;
use serde::{Deserialize, Serialize};

use super::projectile::ProjectileId;
use super::roles::{EnemyVariant, HeroRole, Side};
use super::unit::UnitId;

/// What a stretch of health loss came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DamageCause {
    Attack,
    /// Named skill, including ember projectiles carrying it
    Skill(String),
    /// An enemy walking into the player's stronghold
    Breach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// The enemy stronghold fell
    Victory,
    /// The player stronghold fell
    Defeat,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimEvent {
    HeroSpawned {
        unit: UnitId,
        role: HeroRole,
    },
    EnemySpawned {
        unit: UnitId,
        variant: EnemyVariant,
    },
    EnergySpent {
        amount: f32,
    },
    EnergyUpgraded {
        clicks: u32,
        cost: f32,
        max_energy: f32,
    },
    DamageDealt {
        source: UnitId,
        target: UnitId,
        amount: f32,
        cause: DamageCause,
    },
    Healed {
        source: UnitId,
        target: UnitId,
        amount: f32,
    },
    AttackSpeedBuffed {
        source: UnitId,
        target: UnitId,
        cooldown: f32,
    },
    BuffExpired {
        unit: UnitId,
        cooldown: f32,
    },
    SkillUsed {
        caster: UnitId,
        skill: String,
    },
    ProjectileLaunched {
        projectile: ProjectileId,
        source: UnitId,
        target: UnitId,
    },
    ProjectileExpired {
        projectile: ProjectileId,
    },
    HeroDefeated {
        unit: UnitId,
        role: HeroRole,
    },
    EnemyDefeated {
        unit: UnitId,
        variant: EnemyVariant,
    },
    /// A dying unit finished its death timer and left the field
    UnitRemoved {
        unit: UnitId,
    },
    StrongholdDamaged {
        side: Side,
        source: UnitId,
        amount: f32,
        remaining: f32,
        cause: DamageCause,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl SimEvent {
    /// Short tag used for filtering and counting.
    pub fn kind(&self) -> &'static str {
        match self {
            SimEvent::HeroSpawned { .. } => "hero_spawned",
            SimEvent::EnemySpawned { .. } => "enemy_spawned",
            SimEvent::EnergySpent { .. } => "energy_spent",
            SimEvent::EnergyUpgraded { .. } => "energy_upgraded",
            SimEvent::DamageDealt { .. } => "damage",
            SimEvent::Healed { .. } => "healing",
            SimEvent::AttackSpeedBuffed { .. } => "buff",
            SimEvent::BuffExpired { .. } => "buff_expired",
            SimEvent::SkillUsed { .. } => "skill_used",
            SimEvent::ProjectileLaunched { .. } => "projectile_launched",
            SimEvent::ProjectileExpired { .. } => "projectile_expired",
            SimEvent::HeroDefeated { .. } => "hero_defeated",
            SimEvent::EnemyDefeated { .. } => "enemy_defeated",
            SimEvent::UnitRemoved { .. } => "unit_removed",
            SimEvent::StrongholdDamaged { .. } => "stronghold_damaged",
            SimEvent::BattleEnded { .. } => "battle_ended",
        }
    }
}

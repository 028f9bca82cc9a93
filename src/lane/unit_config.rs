//! Data-Driven Lane Configuration
//!
//! Role presets and tuning values loaded from `assets/config/lane.ron`.
//! `LaneConfig::default()` carries the same values built in, so the
//! simulation runs without touching the filesystem.
//!
//! ## Usage
//! ```ignore
//! let config = load_lane_config(DEFAULT_LANE_CONFIG_PATH)?;
//! let archer = config.hero(HeroRole::Archer).unwrap();
//! println!("Archer costs {} energy", archer.cost);
//! ```

use bevy::log::info;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::constants::*;
use super::error::{check_non_negative, check_positive, SimError};
use super::roles::{EnemyVariant, HeroRole, Role, SkillTargeting};
use super::skill::{Skill, SkillEffect, SkillSlot};
use super::unit::{Unit, UnitId};

pub const DEFAULT_LANE_CONFIG_PATH: &str = "assets/config/lane.ron";

fn default_cast_duration() -> f32 {
    0.3
}

/// Skill definition with named fields for the config file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillPreset {
    pub name: String,
    /// Seconds between successful activations
    pub cooldown: f32,
    /// Probability (0.0 to 1.0) that a ready skill fires on a given tick
    pub chance: f32,
    /// Seconds the caster spends channeling after activation
    #[serde(default = "default_cast_duration")]
    pub cast_duration: f32,
    pub effect: SkillEffect,
    pub targeting: SkillTargeting,
}

impl SkillPreset {
    pub fn build(&self) -> Result<SkillSlot, SimError> {
        Ok(SkillSlot {
            skill: Skill::new(
                self.name.clone(),
                self.cooldown,
                self.chance,
                self.cast_duration,
                self.effect.clone(),
            )?,
            targeting: self.targeting,
        })
    }
}

/// Combat stats shared by heroes and enemies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitPreset {
    pub health: f32,
    /// Distance covered per tick; the direction comes from the unit's side
    pub speed: f32,
    pub damage: f32,
    pub attack_cooldown: f32,
    pub attack_range: f32,
    /// Seconds a dying unit stays on the field before removal
    pub death_duration: f32,
    #[serde(default)]
    pub skill: Option<SkillPreset>,
}

/// A deployable hero: its stats plus what deploying it costs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeroPreset {
    pub stats: UnitPreset,
    /// Energy spent on deployment
    pub cost: f32,
    /// Seconds before the same role can be deployed again
    pub deploy_cooldown: f32,
}

/// Lane geometry and the small constants used by targeting and projectiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaneTuning {
    pub lane_width: f32,
    pub lane_y: f32,
    pub hero_spawn_x: f32,
    /// Enemies appear this far left of the lane's right edge
    pub enemy_spawn_offset: f32,
    pub player_stronghold_x: f32,
    /// The enemy stronghold sits this far left of the lane's right edge
    pub enemy_stronghold_offset: f32,
    /// The attackable proxy stands this far in front of the enemy stronghold
    pub stronghold_proxy_offset: f32,
    pub stronghold_health: f32,
    /// Enemies at or left of this x breach the player's stronghold
    pub breach_x: f32,
    pub breach_damage: f32,
    pub vertical_tolerance: f32,
    pub hero_center_offset: f32,
    pub arrival_tolerance: f32,
    pub projectile_speed: f32,
    pub projectile_max_range: f32,
    /// Range (min, max) of seconds between automatic enemy spawns
    pub enemy_spawn_interval: (f32, f32),
}

impl Default for LaneTuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_y: LANE_Y,
            hero_spawn_x: HERO_SPAWN_X,
            enemy_spawn_offset: ENEMY_SPAWN_OFFSET,
            player_stronghold_x: PLAYER_STRONGHOLD_X,
            enemy_stronghold_offset: ENEMY_STRONGHOLD_OFFSET,
            stronghold_proxy_offset: STRONGHOLD_PROXY_OFFSET,
            stronghold_health: STRONGHOLD_HEALTH,
            breach_x: BREACH_X,
            breach_damage: BREACH_DAMAGE,
            vertical_tolerance: VERTICAL_TOLERANCE,
            hero_center_offset: HERO_CENTER_OFFSET,
            arrival_tolerance: ARRIVAL_TOLERANCE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_max_range: PROJECTILE_MAX_RANGE,
            enemy_spawn_interval: (ENEMY_SPAWN_INTERVAL_MIN, ENEMY_SPAWN_INTERVAL_MAX),
        }
    }
}

impl LaneTuning {
    pub fn enemy_stronghold_x(&self) -> f32 {
        self.lane_width - self.enemy_stronghold_offset
    }

    pub fn enemy_spawn_x(&self) -> f32 {
        self.lane_width - self.enemy_spawn_offset
    }

    fn validate(&self) -> Result<(), SimError> {
        check_positive("tuning", "lane_width", self.lane_width)?;
        check_positive("tuning", "stronghold_health", self.stronghold_health)?;
        check_non_negative("tuning", "breach_damage", self.breach_damage)?;
        check_non_negative("tuning", "vertical_tolerance", self.vertical_tolerance)?;
        check_non_negative("tuning", "arrival_tolerance", self.arrival_tolerance)?;
        check_positive("tuning", "projectile_speed", self.projectile_speed)?;
        check_non_negative("tuning", "projectile_max_range", self.projectile_max_range)?;
        let (min, max) = self.enemy_spawn_interval;
        check_positive("tuning", "enemy_spawn_interval.min", min)?;
        check_positive("tuning", "enemy_spawn_interval.max", max)?;
        if min > max {
            return Err(SimError::InvalidConfig(format!(
                "enemy_spawn_interval is reversed: ({}, {})",
                min, max
            )));
        }
        Ok(())
    }
}

/// Energy pool settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_energy: f32,
    pub max_energy: f32,
    /// Energy regained per tick
    pub regen_rate: f32,
    pub max_upgrades: u32,
    pub upgrade_base_cost: f32,
    /// Added to the upgrade cost for every upgrade already bought
    pub upgrade_cost_step: f32,
    pub upgrade_max_energy_step: f32,
    pub upgrade_regen_step: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_energy: STARTING_ENERGY,
            max_energy: STARTING_MAX_ENERGY,
            regen_rate: STARTING_REGEN_RATE,
            max_upgrades: MAX_UPGRADE_CLICKS,
            upgrade_base_cost: UPGRADE_BASE_COST,
            upgrade_cost_step: UPGRADE_COST_STEP,
            upgrade_max_energy_step: UPGRADE_MAX_ENERGY_STEP,
            upgrade_regen_step: UPGRADE_REGEN_STEP,
        }
    }
}

impl EconomyConfig {
    fn validate(&self) -> Result<(), SimError> {
        check_positive("economy", "max_energy", self.max_energy)?;
        check_non_negative("economy", "starting_energy", self.starting_energy)?;
        check_non_negative("economy", "regen_rate", self.regen_rate)?;
        check_non_negative("economy", "upgrade_base_cost", self.upgrade_base_cost)?;
        check_non_negative("economy", "upgrade_cost_step", self.upgrade_cost_step)?;
        check_non_negative("economy", "upgrade_max_energy_step", self.upgrade_max_energy_step)?;
        check_non_negative("economy", "upgrade_regen_step", self.upgrade_regen_step)?;
        if self.starting_energy > self.max_energy {
            return Err(SimError::InvalidConfig(format!(
                "starting_energy {} exceeds max_energy {}",
                self.starting_energy, self.max_energy
            )));
        }
        Ok(())
    }
}

/// Root structure for the lane.ron file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    #[serde(default)]
    pub tuning: LaneTuning,
    #[serde(default)]
    pub economy: EconomyConfig,
    pub heroes: HashMap<HeroRole, HeroPreset>,
    pub enemies: HashMap<EnemyVariant, UnitPreset>,
}

impl Default for LaneConfig {
    fn default() -> Self {
        let heroes = HashMap::from([
            (
                HeroRole::Archer,
                HeroPreset {
                    stats: UnitPreset {
                        health: 60.0,
                        speed: 2.0,
                        damage: 10.0,
                        attack_cooldown: 0.5,
                        attack_range: 500.0,
                        death_duration: 1.0,
                        skill: Some(SkillPreset {
                            name: "Buff".to_string(),
                            cooldown: 5.0,
                            chance: 0.4,
                            cast_duration: default_cast_duration(),
                            effect: SkillEffect::BuffAttackSpeed {
                                amount: 0.5,
                                duration: 5.0,
                            },
                            targeting: SkillTargeting::NearbyAllies { range: 150.0 },
                        }),
                    },
                    cost: 20.0,
                    deploy_cooldown: 3.0,
                },
            ),
            (
                HeroRole::Warrior,
                HeroPreset {
                    stats: UnitPreset {
                        health: 150.0,
                        speed: 2.0,
                        damage: 15.0,
                        attack_cooldown: 0.5,
                        attack_range: 40.0,
                        death_duration: 1.0,
                        skill: None,
                    },
                    cost: 10.0,
                    deploy_cooldown: 2.0,
                },
            ),
            (
                HeroRole::Mage,
                HeroPreset {
                    stats: UnitPreset {
                        health: 80.0,
                        speed: 1.0,
                        damage: 10.0,
                        attack_cooldown: 1.0,
                        attack_range: 350.0,
                        death_duration: 1.0,
                        skill: Some(SkillPreset {
                            name: "AOE".to_string(),
                            cooldown: 3.0,
                            chance: 0.6,
                            cast_duration: default_cast_duration(),
                            effect: SkillEffect::AreaDamage {
                                radius: 100.0,
                                damage: 20.0,
                            },
                            targeting: SkillTargeting::AllEnemies,
                        }),
                    },
                    cost: 20.0,
                    deploy_cooldown: 3.0,
                },
            ),
            (
                HeroRole::Healer,
                HeroPreset {
                    stats: UnitPreset {
                        health: 70.0,
                        speed: 1.5,
                        damage: 3.0,
                        attack_cooldown: 1.0,
                        attack_range: 200.0,
                        death_duration: 1.0,
                        skill: Some(SkillPreset {
                            name: "Group Heal".to_string(),
                            cooldown: 5.0,
                            chance: 1.0,
                            cast_duration: 1.5,
                            effect: SkillEffect::GroupHeal { amount: 15.0 },
                            targeting: SkillTargeting::WoundedAllies { range: 150.0 },
                        }),
                    },
                    cost: 15.0,
                    deploy_cooldown: 2.0,
                },
            ),
        ]);

        let slime = UnitPreset {
            health: 200.0,
            speed: 1.5,
            damage: 20.0,
            attack_cooldown: 0.5,
            attack_range: 40.0,
            death_duration: 0.8,
            skill: None,
        };
        let enemies = EnemyVariant::ALL
            .into_iter()
            .map(|variant| (variant, slime.clone()))
            .collect();

        Self {
            tuning: LaneTuning::default(),
            economy: EconomyConfig::default(),
            heroes,
            enemies,
        }
    }
}

impl LaneConfig {
    pub fn hero(&self, role: HeroRole) -> Option<&HeroPreset> {
        self.heroes.get(&role)
    }

    pub fn enemy(&self, variant: EnemyVariant) -> Option<&UnitPreset> {
        self.enemies.get(&variant)
    }

    /// Check that every role is present and every preset builds a valid unit.
    pub fn validate(&self) -> Result<(), SimError> {
        self.tuning.validate()?;
        self.economy.validate()?;

        let missing_heroes: Vec<&str> = HeroRole::ALL
            .iter()
            .filter(|role| !self.heroes.contains_key(role))
            .map(|role| role.name())
            .collect();
        let missing_enemies: Vec<&str> = EnemyVariant::ALL
            .iter()
            .filter(|variant| !self.enemies.contains_key(variant))
            .map(|variant| variant.name())
            .collect();
        if !missing_heroes.is_empty() || !missing_enemies.is_empty() {
            return Err(SimError::InvalidConfig(format!(
                "missing presets: {:?}",
                [missing_heroes, missing_enemies].concat()
            )));
        }

        for (role, preset) in &self.heroes {
            check_non_negative(role.name(), "cost", preset.cost)?;
            check_non_negative(role.name(), "deploy_cooldown", preset.deploy_cooldown)?;
            Unit::from_preset(UnitId(0), Role::Hero(*role), &preset.stats, Vec2::ZERO)?;
        }
        for (variant, preset) in &self.enemies {
            Unit::from_preset(UnitId(0), Role::Enemy(*variant), preset, Vec2::ZERO)?;
        }
        Ok(())
    }
}

/// Load and validate a lane configuration from a RON file.
pub fn load_lane_config(path: impl AsRef<Path>) -> Result<LaneConfig, SimError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let contents = std::fs::read_to_string(path).map_err(|source| SimError::Io {
        path: display.clone(),
        source,
    })?;

    let config: LaneConfig = ron::from_str(&contents).map_err(|source| SimError::Parse {
        path: display.clone(),
        source,
    })?;

    config.validate()?;

    info!(
        "Loaded {} hero and {} enemy presets from {}",
        config.heroes.len(),
        config.enemies.len(),
        path.display()
    );

    Ok(config)
}

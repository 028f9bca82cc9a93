//! Units
//!
//! One struct for every body walking the lane. The role tag picks the stats
//! and targeting rules; there is no per-role type.
//!
//! ## Lifecycle
//!
//! `Moving <-> Attacking` is re-decided every tick from range checks.
//! `Channeling` is entered when a skill fires and only ends when its cast
//! duration elapses; incoming damage does not interrupt it. `Dying` is entered
//! the moment health reaches zero and is terminal: the simulation removes the
//! unit once its death duration has passed.

use bevy::log::warn;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::attack::{Attack, DamageOutcome, Damageable};
use super::error::{check_non_negative, check_positive, SimError};
use super::roles::Role;
use super::skill::SkillSlot;
use super::unit_config::UnitPreset;
use super::Timestamp;

/// Stable identifier handed out by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Behavioral state of a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitState {
    Moving,
    Attacking,
    /// Busy with a skill until the given time
    Channeling { until: Timestamp },
    /// Down since the given time, waiting to be removed
    Dying { since: Timestamp },
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub id: UnitId,
    pub role: Role,
    /// x runs along the lane; y only matters for the vertical targeting band
    pub position: Vec2,
    /// Signed distance covered per tick (positive for heroes)
    pub speed: f32,
    pub attack: Attack,
    /// Maximum x distance at which this unit can attack
    pub attack_range: f32,
    pub skill: Option<SkillSlot>,
    health: f32,
    max_health: f32,
    alive: bool,
    state: UnitState,
    death_duration: f32,
}

impl Unit {
    /// Build a unit from its role preset.
    ///
    /// The preset's speed is a magnitude; its sign comes from the role's side.
    pub fn from_preset(
        id: UnitId,
        role: Role,
        preset: &UnitPreset,
        position: Vec2,
    ) -> Result<Self, SimError> {
        let owner = role.name();
        check_positive(owner, "health", preset.health)?;
        check_non_negative(owner, "speed", preset.speed)?;
        check_non_negative(owner, "damage", preset.damage)?;
        check_non_negative(owner, "attack_cooldown", preset.attack_cooldown)?;
        check_non_negative(owner, "attack_range", preset.attack_range)?;
        check_non_negative(owner, "death_duration", preset.death_duration)?;
        if !position.is_finite() {
            return Err(SimError::InvalidStat {
                owner: owner.to_string(),
                stat: "position",
                requirement: "finite",
                value: if position.x.is_finite() { position.y } else { position.x },
            });
        }

        let skill = preset
            .skill
            .as_ref()
            .map(|skill| skill.build())
            .transpose()?;

        Ok(Self {
            id,
            role,
            position,
            speed: preset.speed * role.side().direction(),
            attack: Attack::new(preset.damage, preset.attack_cooldown)?,
            attack_range: preset.attack_range,
            skill,
            health: preset.health,
            max_health: preset.health,
            alive: true,
            state: UnitState::Moving,
            death_duration: preset.death_duration,
        })
    }

    /// Human-readable name, e.g. "Archer #3".
    pub fn label(&self) -> String {
        format!("{} {}", self.role.name(), self.id)
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction (0.0 to 1.0)
    pub fn health_pct(&self) -> f32 {
        self.health / self.max_health
    }

    pub fn is_injured(&self) -> bool {
        self.health < self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, UnitState::Dying { .. })
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    pub fn death_duration(&self) -> f32 {
        self.death_duration
    }

    /// Switch between moving and attacking. Ignored once the unit is down.
    pub(crate) fn set_state(&mut self, state: UnitState) {
        if self.alive {
            self.state = state;
        }
    }

    /// Walk one tick along the lane.
    pub fn advance(&mut self) {
        if self.alive {
            self.position.x += self.speed;
        }
    }

    pub fn begin_channel(&mut self, now: Timestamp, duration: f32) {
        self.set_state(UnitState::Channeling {
            until: now + duration,
        });
    }

    /// Returns true while the unit is still channeling at `now`.
    ///
    /// A finished channel drops the unit back to `Moving` so the rest of the
    /// tick can decide what it does next.
    pub fn update_channel(&mut self, now: Timestamp) -> bool {
        match self.state {
            UnitState::Channeling { until } if now < until => true,
            UnitState::Channeling { .. } => {
                self.state = UnitState::Moving;
                false
            }
            _ => false,
        }
    }

    /// Restore up to `amount` health. Returns the health actually gained.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.alive || amount <= 0.0 {
            return 0.0;
        }
        let healed = amount.min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Send the unit into the death pipeline regardless of its health.
    pub fn kill(&mut self, now: Timestamp) {
        if self.alive {
            self.alive = false;
            self.state = UnitState::Dying { since: now };
        }
    }

    /// True once a dying unit has spent its whole death duration on the field.
    pub fn death_finished(&self, now: Timestamp) -> bool {
        match self.state {
            UnitState::Dying { since } => now - since >= self.death_duration,
            _ => false,
        }
    }

    /// Force health and position back into range.
    ///
    /// Returns a description of what was wrong, if anything. A unit whose
    /// state cannot be trusted at all is sent into the death pipeline.
    pub(crate) fn repair_invariants(&mut self, now: Timestamp) -> Option<&'static str> {
        if !self.health.is_finite() || !self.position.is_finite() {
            warn!("{} has a non-finite health or position, removing it", self.label());
            self.health = 0.0;
            self.kill(now);
            return Some("non-finite state");
        }
        if self.health < 0.0 || self.health > self.max_health {
            self.health = self.health.clamp(0.0, self.max_health);
            if self.health <= 0.0 {
                self.kill(now);
            }
            return Some("health out of range");
        }
        None
    }
}

impl Damageable for Unit {
    fn receive_damage(&mut self, amount: f32, now: Timestamp) -> DamageOutcome {
        if !self.alive || amount <= 0.0 {
            return DamageOutcome::NONE;
        }
        let dealt = amount.min(self.health);
        self.health -= dealt;
        let killed = self.health <= 0.0;
        if killed {
            self.health = 0.0;
            self.kill(now);
        }
        DamageOutcome { dealt, killed }
    }
}

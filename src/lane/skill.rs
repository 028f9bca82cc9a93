//! Skills and Skill Effects
//!
//! A `Skill` is the gating half: its own cooldown plus an activation chance
//! rolled every tick the cooldown is ready. A `SkillEffect` is the payload,
//! applied to a candidate set the caller has already filtered by range and
//! alliance.

use bevy::log::debug;
use serde::{Deserialize, Serialize};

use super::attack::{DamageOutcome, Damageable};
use super::cooldown::CooldownGate;
use super::error::{check_non_negative, SimError};
use super::roles::SkillTargeting;
use super::unit::{Unit, UnitId};
use super::Timestamp;

/// Payload of a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillEffect {
    /// Damage every living target within `radius` of the caster on the x axis
    AreaDamage { radius: f32, damage: f32 },
    /// Shorten each target's attack cooldown by `amount` for `duration` seconds
    BuffAttackSpeed { amount: f32, duration: f32 },
    /// Restore `amount` health to each living, injured target
    GroupHeal { amount: f32 },
    /// Placeholder that only reports itself
    Shield,
}

/// Where and when an effect is being applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectContext {
    pub caster: UnitId,
    pub caster_x: f32,
    pub now: Timestamp,
}

/// One change an effect made to one target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectImpact {
    Damaged { target: UnitId, outcome: DamageOutcome },
    Healed { target: UnitId, amount: f32 },
    /// `cooldown` is the target's attack cooldown after the buff
    Buffed { target: UnitId, cooldown: f32 },
}

impl EffectImpact {
    pub fn target(&self) -> UnitId {
        match self {
            EffectImpact::Damaged { target, .. }
            | EffectImpact::Healed { target, .. }
            | EffectImpact::Buffed { target, .. } => *target,
        }
    }
}

impl SkillEffect {
    pub fn validate(&self, skill: &str) -> Result<(), SimError> {
        match *self {
            SkillEffect::AreaDamage { radius, damage } => {
                check_non_negative(skill, "radius", radius)?;
                check_non_negative(skill, "damage", damage)
            }
            SkillEffect::BuffAttackSpeed { amount, duration } => {
                check_non_negative(skill, "buff amount", amount)?;
                check_non_negative(skill, "buff duration", duration)
            }
            SkillEffect::GroupHeal { amount } => check_non_negative(skill, "heal amount", amount),
            SkillEffect::Shield => Ok(()),
        }
    }

    /// Apply the effect to `targets` and report what changed.
    ///
    /// Dead targets are skipped. A target that was not changed (full health
    /// for a heal, out of radius for area damage) produces no impact, but the
    /// effect still counts as applied.
    pub fn apply(&self, ctx: &EffectContext, targets: &mut [&mut Unit]) -> Vec<EffectImpact> {
        let mut impacts = Vec::new();
        match *self {
            SkillEffect::AreaDamage { radius, damage } => {
                for target in targets.iter_mut() {
                    if !target.is_alive() || (target.x() - ctx.caster_x).abs() > radius {
                        continue;
                    }
                    let outcome = target.receive_damage(damage, ctx.now);
                    if outcome.dealt > 0.0 {
                        impacts.push(EffectImpact::Damaged {
                            target: target.id,
                            outcome,
                        });
                    }
                }
            }
            SkillEffect::BuffAttackSpeed { amount, duration } => {
                for target in targets.iter_mut().filter(|t| t.is_alive()) {
                    target.attack.apply_speed_buff(amount, ctx.now + duration);
                    impacts.push(EffectImpact::Buffed {
                        target: target.id,
                        cooldown: target.attack.cooldown(),
                    });
                }
            }
            SkillEffect::GroupHeal { amount } => {
                for target in targets.iter_mut() {
                    let healed = target.heal(amount);
                    if healed > 0.0 {
                        impacts.push(EffectImpact::Healed {
                            target: target.id,
                            amount: healed,
                        });
                    }
                }
            }
            SkillEffect::Shield => {
                debug!("Shield from {} has no effect", ctx.caster);
            }
        }
        impacts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub name: String,
    gate: CooldownGate,
    chance: f32,
    cast_duration: f32,
    effect: SkillEffect,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        cooldown: f32,
        chance: f32,
        cast_duration: f32,
        effect: SkillEffect,
    ) -> Result<Self, SimError> {
        let name = name.into();
        check_non_negative(&name, "cooldown", cooldown)?;
        check_non_negative(&name, "cast_duration", cast_duration)?;
        if !(0.0..=1.0).contains(&chance) {
            return Err(SimError::InvalidChance { skill: name, chance });
        }
        effect.validate(&name)?;
        Ok(Self {
            name,
            gate: CooldownGate::new(cooldown),
            chance,
            cast_duration,
            effect,
        })
    }

    pub fn cooldown(&self) -> f32 {
        self.gate.duration
    }

    pub fn last_used(&self) -> Option<Timestamp> {
        self.gate.last_time()
    }

    pub fn chance(&self) -> f32 {
        self.chance
    }

    pub fn cast_duration(&self) -> f32 {
        self.cast_duration
    }

    pub fn effect(&self) -> &SkillEffect {
        &self.effect
    }

    pub fn cooldown_ready(&self, now: Timestamp) -> bool {
        self.gate.is_ready(now)
    }

    /// Pass the cooldown gate and the activation roll.
    ///
    /// `roll` is only drawn when the cooldown is ready and must yield a value
    /// in `0.0..1.0`. The cooldown restarts only when the roll succeeds.
    pub fn try_activate(&mut self, now: Timestamp, roll: impl FnOnce() -> f32) -> bool {
        if !self.gate.is_ready(now) {
            return false;
        }
        let drawn = roll();
        if drawn >= self.chance {
            debug!("{} roll failed ({:.2} >= {:.2})", self.name, drawn, self.chance);
            return false;
        }
        self.gate.trigger(now);
        true
    }

    /// Activate on behalf of `caster` and apply the effect to `targets`.
    ///
    /// On success the caster starts channeling for the cast duration and the
    /// impacts are returned. Returns `None` when the gate or roll refused.
    pub fn use_skill(
        &mut self,
        now: Timestamp,
        roll: impl FnOnce() -> f32,
        caster: &mut Unit,
        targets: &mut [&mut Unit],
    ) -> Option<Vec<EffectImpact>> {
        if !caster.is_alive() || !self.try_activate(now, roll) {
            return None;
        }
        let ctx = EffectContext {
            caster: caster.id,
            caster_x: caster.x(),
            now,
        };
        let impacts = self.effect.apply(&ctx, targets);
        caster.begin_channel(now, self.cast_duration);
        Some(impacts)
    }
}

/// A role's skill together with how its candidates are picked.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillSlot {
    pub skill: Skill,
    pub targeting: SkillTargeting,
}

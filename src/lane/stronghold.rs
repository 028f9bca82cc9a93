//! Strongholds
//!
//! Each side has one stronghold. The player's is only ever hit by enemies
//! breaching the lane; the enemy's is attacked by heroes through a
//! `BaseTarget` proxy standing in front of it.

use bevy::math::Vec2;

use super::attack::{DamageOutcome, Damageable};
use super::roles::Side;
use super::unit::UnitId;
use super::Timestamp;

#[derive(Debug, Clone, PartialEq)]
pub struct Stronghold {
    pub side: Side,
    /// Lane x of the structure itself
    pub x: f32,
    health: f32,
    max_health: f32,
}

impl Stronghold {
    pub fn new(side: Side, x: f32, max_health: f32) -> Self {
        Self {
            side,
            x,
            health: max_health,
            max_health,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Remove up to `amount` health. Returns the health actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 || self.is_destroyed() {
            return 0.0;
        }
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }
}

impl Damageable for Stronghold {
    fn receive_damage(&mut self, amount: f32, _now: Timestamp) -> DamageOutcome {
        let dealt = self.take_damage(amount);
        DamageOutcome {
            dealt,
            killed: dealt > 0.0 && self.is_destroyed(),
        }
    }
}

/// The attackable stand-in for the enemy stronghold.
///
/// It has no health of its own: every hit goes straight into the structure
/// it owns, so the two can never disagree. It never moves and never attacks.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTarget {
    pub id: UnitId,
    pub position: Vec2,
    structure: Stronghold,
}

impl BaseTarget {
    pub fn new(id: UnitId, position: Vec2, structure: Stronghold) -> Self {
        Self {
            id,
            position,
            structure,
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn health(&self) -> f32 {
        self.structure.health()
    }

    pub fn is_alive(&self) -> bool {
        !self.structure.is_destroyed()
    }

    pub fn structure(&self) -> &Stronghold {
        &self.structure
    }
}

impl Damageable for BaseTarget {
    fn receive_damage(&mut self, amount: f32, now: Timestamp) -> DamageOutcome {
        self.structure.receive_damage(amount, now)
    }
}

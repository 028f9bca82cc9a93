//! Unit roles
//!
//! The closed set of things that can walk the lane. Stats live in the
//! presets (`unit_config`); this module only names the roles and their sides.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stronghold a unit fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Sign of the x velocity: player units walk right, enemies walk left.
    pub fn direction(self) -> f32 {
        match self {
            Side::Player => 1.0,
            Side::Enemy => -1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Enemy => "Enemy",
        }
    }
}

/// Player-deployable hero roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeroRole {
    Archer,
    Warrior,
    Mage,
    Healer,
}

impl HeroRole {
    pub const ALL: [HeroRole; 4] = [
        HeroRole::Archer,
        HeroRole::Warrior,
        HeroRole::Mage,
        HeroRole::Healer,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeroRole::Archer => "Archer",
            HeroRole::Warrior => "Warrior",
            HeroRole::Mage => "Mage",
            HeroRole::Healer => "Healer",
        }
    }

    /// Parse a role from its display name (case-insensitive).
    pub fn parse(name: &str) -> Option<HeroRole> {
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for HeroRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enemy unit variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyVariant {
    BlueSlime,
    GreenSlime,
    RedSlime,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 3] = [
        EnemyVariant::BlueSlime,
        EnemyVariant::GreenSlime,
        EnemyVariant::RedSlime,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyVariant::BlueSlime => "Blue Slime",
            EnemyVariant::GreenSlime => "Green Slime",
            EnemyVariant::RedSlime => "Red Slime",
        }
    }
}

impl fmt::Display for EnemyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role tag carried by every unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Hero(HeroRole),
    Enemy(EnemyVariant),
}

impl Role {
    pub fn side(&self) -> Side {
        match self {
            Role::Hero(_) => Side::Player,
            Role::Enemy(_) => Side::Enemy,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Hero(role) => role.name(),
            Role::Enemy(variant) => variant.name(),
        }
    }

    pub fn hero(&self) -> Option<HeroRole> {
        match self {
            Role::Hero(role) => Some(*role),
            Role::Enemy(_) => None,
        }
    }
}

/// Who a role's skill is pointed at. The caller builds the candidate set
/// from this before the effect runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkillTargeting {
    /// Living allies (never the caster) within `range` on the x axis
    NearbyAllies { range: f32 },
    /// Living, injured allies (never the caster) within `range` on the x axis
    WoundedAllies { range: f32 },
    /// Every living enemy unit; range is left to the effect
    AllEnemies,
}

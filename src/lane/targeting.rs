//! Targeting Policies
//!
//! Pure selection functions: they look at the candidate collections and
//! return indices, never mutate. Units that are dying or dead are never
//! selected, so a unit killed earlier in a tick drops out of every later
//! decision in that tick.

use smallvec::SmallVec;

use super::constants::{HERO_CENTER_OFFSET, VERTICAL_TOLERANCE};
use super::roles::SkillTargeting;
use super::stronghold::BaseTarget;
use super::unit::Unit;

/// Tunable spatial constants used by the policies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetingRules {
    /// Maximum y distance between a hero and the enemy it attacks
    pub vertical_tolerance: f32,
    /// Enemies measure their reach from this far right of a hero's x
    pub hero_center_offset: f32,
}

impl Default for TargetingRules {
    fn default() -> Self {
        Self {
            vertical_tolerance: VERTICAL_TOLERANCE,
            hero_center_offset: HERO_CENTER_OFFSET,
        }
    }
}

/// Indices of units a skill will be applied to.
pub type CandidateIndices = SmallVec<[usize; 8]>;

/// Which collection a skill's candidate indices point into.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillCandidates {
    Allies(CandidateIndices),
    Enemies(CandidateIndices),
}

impl SkillCandidates {
    pub fn is_empty(&self) -> bool {
        match self {
            SkillCandidates::Allies(indices) | SkillCandidates::Enemies(indices) => indices.is_empty(),
        }
    }
}

/// Nearest living enemy ahead of the hero, within its attack range and the
/// vertical band.
pub fn hero_attack_target(hero: &Unit, enemies: &[Unit], rules: &TargetingRules) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, enemy)| {
            enemy.is_alive()
                && enemy.x() > hero.x()
                && (enemy.x() - hero.x()).abs() <= hero.attack_range
                && (enemy.position.y - hero.position.y).abs() <= rules.vertical_tolerance
        })
        .min_by(|(_, a), (_, b)| a.x().total_cmp(&b.x()))
        .map(|(index, _)| index)
}

/// True when the hero can reach the enemy stronghold's proxy.
pub fn stronghold_in_reach(hero: &Unit, base: &BaseTarget) -> bool {
    base.is_alive() && (hero.x() - base.x()).abs() <= hero.attack_range
}

/// Nearest living hero whose center is within the enemy's reach.
pub fn enemy_attack_target(enemy: &Unit, heroes: &[Unit], rules: &TargetingRules) -> Option<usize> {
    heroes
        .iter()
        .enumerate()
        .filter(|(_, hero)| hero.is_alive())
        .map(|(index, hero)| (index, (enemy.x() - (hero.x() + rules.hero_center_offset)).abs()))
        .filter(|(_, distance)| *distance <= enemy.attack_range)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
}

/// Build the candidate set for the skill of `heroes[caster]`.
pub fn skill_candidates(
    caster: usize,
    targeting: SkillTargeting,
    heroes: &[Unit],
    enemies: &[Unit],
) -> SkillCandidates {
    let caster_x = heroes[caster].x();
    let allies = |wounded_only: bool, range: f32| -> CandidateIndices {
        heroes
            .iter()
            .enumerate()
            .filter(|(index, ally)| {
                *index != caster
                    && ally.is_alive()
                    && (!wounded_only || ally.is_injured())
                    && (ally.x() - caster_x).abs() <= range
            })
            .map(|(index, _)| index)
            .collect()
    };

    match targeting {
        SkillTargeting::NearbyAllies { range } => SkillCandidates::Allies(allies(false, range)),
        SkillTargeting::WoundedAllies { range } => SkillCandidates::Allies(allies(true, range)),
        SkillTargeting::AllEnemies => SkillCandidates::Enemies(
            enemies
                .iter()
                .enumerate()
                .filter(|(_, enemy)| enemy.is_alive())
                .map(|(index, _)| index)
                .collect(),
        ),
    }
}

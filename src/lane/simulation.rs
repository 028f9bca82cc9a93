//! Simulation Step
//!
//! `Simulation` owns every active collection and advances them together, one
//! tick at a time. Within a tick the order is fixed:
//!
//! 1. automatic enemy wave spawn
//! 2. heroes (buff expiry, channel, attack or move, skill)
//! 3. enemies (attack or move, breach)
//! 4. projectiles, with arrivals resolved after all have moved
//! 5. per-unit invariant repair
//! 6. sweep: newly dying units move to the dying lists, finished ones leave
//! 7. economy regeneration
//! 8. outcome check
//!
//! Every comparison in a tick uses the single `now` passed to `advance_tick`.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use std::collections::HashMap;

use super::attack::DamageOutcome;
use super::cooldown::CooldownGate;
use super::economy::{Economy, EconomySnapshot};
use super::error::SimError;
use super::events::{BattleOutcome, DamageCause, SimEvent};
use super::projectile::{Projectile, ProjectileId, ProjectilePayload, ProjectileStep};
use super::rng::GameRng;
use super::roles::{EnemyVariant, HeroRole, Role, Side};
use super::skill::{EffectContext, EffectImpact, Skill, SkillEffect};
use super::stronghold::{BaseTarget, Stronghold};
use super::targeting::{self, SkillCandidates, TargetingRules};
use super::unit::{Unit, UnitId, UnitState};
use super::unit_config::LaneConfig;
use super::Timestamp;

/// Id reserved for the enemy stronghold's proxy.
pub const ENEMY_BASE_ID: UnitId = UnitId(0);

/// Timer for automatic enemy spawns.
#[derive(Debug, Clone)]
struct EnemyWaves {
    enabled: bool,
    last_spawn: Option<Timestamp>,
    interval: f32,
}

#[derive(Debug)]
pub struct Simulation {
    config: LaneConfig,
    rules: TargetingRules,
    heroes: Vec<Unit>,
    enemies: Vec<Unit>,
    dying_heroes: Vec<Unit>,
    dying_enemies: Vec<Unit>,
    projectiles: Vec<Projectile>,
    player_stronghold: Stronghold,
    enemy_base: BaseTarget,
    economy: Economy,
    deploy_gates: HashMap<HeroRole, CooldownGate>,
    waves: EnemyWaves,
    rng: GameRng,
    pending: Vec<SimEvent>,
    next_unit_id: u32,
    next_projectile_id: u32,
    last_tick: Option<Timestamp>,
    tick_count: u64,
    outcome: Option<BattleOutcome>,
    paused: bool,
}

impl Simulation {
    pub fn new(config: LaneConfig, rng: GameRng) -> Result<Self, SimError> {
        config.validate()?;

        let tuning = &config.tuning;
        let rules = TargetingRules {
            vertical_tolerance: tuning.vertical_tolerance,
            hero_center_offset: tuning.hero_center_offset,
        };
        let player_stronghold =
            Stronghold::new(Side::Player, tuning.player_stronghold_x, tuning.stronghold_health);
        let enemy_stronghold_x = tuning.enemy_stronghold_x();
        let enemy_base = BaseTarget::new(
            ENEMY_BASE_ID,
            Vec2::new(enemy_stronghold_x - tuning.stronghold_proxy_offset, tuning.lane_y),
            Stronghold::new(Side::Enemy, enemy_stronghold_x, tuning.stronghold_health),
        );
        let deploy_gates = config
            .heroes
            .iter()
            .map(|(role, preset)| (*role, CooldownGate::new(preset.deploy_cooldown)))
            .collect();

        Ok(Self {
            economy: Economy::new(&config.economy),
            rules,
            heroes: Vec::new(),
            enemies: Vec::new(),
            dying_heroes: Vec::new(),
            dying_enemies: Vec::new(),
            projectiles: Vec::new(),
            player_stronghold,
            enemy_base,
            deploy_gates,
            waves: EnemyWaves {
                enabled: true,
                last_spawn: None,
                interval: 0.0,
            },
            rng,
            pending: Vec::new(),
            next_unit_id: ENEMY_BASE_ID.0 + 1,
            next_projectile_id: 1,
            last_tick: None,
            tick_count: 0,
            outcome: None,
            paused: false,
            config,
        })
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// True when `role` is off its deploy cooldown and affordable.
    pub fn can_deploy(&self, role: HeroRole, now: Timestamp) -> bool {
        let Some(preset) = self.config.hero(role) else {
            return false;
        };
        self.outcome.is_none()
            && self.deploy_gates.get(&role).is_some_and(|gate| gate.is_ready(now))
            && self.economy.can_afford(preset.cost)
    }

    /// Deploy a hero at the left end of the lane.
    ///
    /// Refused silently (returns `None`) while the role's deploy cooldown
    /// runs, when energy is short, or once the battle is over.
    pub fn spawn_hero(&mut self, role: HeroRole, now: Timestamp) -> Option<UnitId> {
        if !self.can_deploy(role, now) {
            debug!("Cannot deploy {} at {:.2}s", role, now);
            return None;
        }
        let preset = self.config.hero(role)?;
        let cost = preset.cost;
        let position = Vec2::new(self.config.tuning.hero_spawn_x, self.config.tuning.lane_y);
        let id = UnitId(self.next_unit_id);
        let unit = match Unit::from_preset(id, Role::Hero(role), &preset.stats, position) {
            Ok(unit) => unit,
            Err(e) => {
                warn!("Failed to build {}: {}", role, e);
                return None;
            }
        };

        self.next_unit_id += 1;
        self.economy.spend(cost);
        if let Some(gate) = self.deploy_gates.get_mut(&role) {
            gate.trigger(now);
        }
        info!("Deployed {} for {} energy", unit.label(), cost);
        self.heroes.push(unit);
        self.pending.push(SimEvent::HeroSpawned { unit: id, role });
        self.pending.push(SimEvent::EnergySpent { amount: cost });
        Some(id)
    }

    /// Place an enemy at the right end of the lane.
    pub fn spawn_enemy(&mut self, variant: EnemyVariant, now: Timestamp) -> Option<UnitId> {
        if self.outcome.is_some() {
            return None;
        }
        let preset = self.config.enemy(variant)?;
        let position = Vec2::new(self.config.tuning.enemy_spawn_x(), self.config.tuning.lane_y);
        let id = UnitId(self.next_unit_id);
        let unit = match Unit::from_preset(id, Role::Enemy(variant), preset, position) {
            Ok(unit) => unit,
            Err(e) => {
                warn!("Failed to build {}: {}", variant, e);
                return None;
            }
        };

        self.next_unit_id += 1;
        debug!("{} enters the lane at {:.2}s", unit.label(), now);
        self.enemies.push(unit);
        self.pending.push(SimEvent::EnemySpawned { unit: id, variant });
        Some(id)
    }

    /// Buy one economy upgrade. Returns false when refused.
    pub fn upgrade_economy(&mut self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let Some(cost) = self.economy.upgrade() else {
            debug!("Energy upgrade refused");
            return false;
        };
        info!(
            "Energy upgraded to {} max (upgrade {})",
            self.economy.max_energy(),
            self.economy.upgrade_clicks()
        );
        self.pending.push(SimEvent::EnergyUpgraded {
            clicks: self.economy.upgrade_clicks(),
            cost,
            max_energy: self.economy.max_energy(),
        });
        self.pending.push(SimEvent::EnergySpent { amount: cost });
        true
    }

    /// Turn automatic enemy spawning on or off. Re-enabling re-arms the timer.
    pub fn set_enemy_waves(&mut self, enabled: bool) {
        self.waves.enabled = enabled;
        self.waves.last_spawn = None;
    }

    /// A paused simulation ignores ticks.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Run one full simulation step and return everything that happened
    /// since the previous call.
    pub fn advance_tick(&mut self, now: Timestamp) -> Vec<SimEvent> {
        if self.outcome.is_some() || self.paused {
            return std::mem::take(&mut self.pending);
        }

        let now = match self.last_tick {
            Some(last) if !(now >= last) => {
                warn!("Clock sample {} is behind the last tick {}, holding time", now, last);
                last
            }
            None if !now.is_finite() => {
                warn!("Clock sample {} is not finite, starting at 0", now);
                0.0
            }
            _ => now,
        };
        self.last_tick = Some(now);
        self.tick_count += 1;

        self.spawn_wave_enemy(now);

        for index in 0..self.heroes.len() {
            self.tick_hero(index, now);
        }
        for index in 0..self.enemies.len() {
            self.tick_enemy(index, now);
        }
        self.step_projectiles(now);

        self.repair_units(now);
        self.sweep(now);
        self.economy.regenerate();
        self.check_outcome();

        std::mem::take(&mut self.pending)
    }

    fn spawn_wave_enemy(&mut self, now: Timestamp) {
        if !self.waves.enabled {
            return;
        }
        let Some(last_spawn) = self.waves.last_spawn else {
            self.waves.last_spawn = Some(now);
            self.waves.interval = self.draw_spawn_interval();
            return;
        };
        if now - last_spawn >= self.waves.interval {
            let variant = EnemyVariant::ALL[self.rng.random_index(EnemyVariant::ALL.len())];
            self.spawn_enemy(variant, now);
            self.waves.last_spawn = Some(now);
            self.waves.interval = self.draw_spawn_interval();
        }
    }

    fn draw_spawn_interval(&mut self) -> f32 {
        let (min, max) = self.config.tuning.enemy_spawn_interval;
        self.rng.random_range(min, max)
    }

    fn tick_hero(&mut self, index: usize, now: Timestamp) {
        if !self.heroes[index].is_alive() {
            return;
        }
        if let Some(cooldown) = self.heroes[index].attack.expire_buff(now) {
            let unit = self.heroes[index].id;
            debug!("Attack speed buff on {} expired", unit);
            self.pending.push(SimEvent::BuffExpired { unit, cooldown });
        }
        if self.heroes[index].update_channel(now) {
            return;
        }

        if let Some(target) = targeting::hero_attack_target(&self.heroes[index], &self.enemies, &self.rules) {
            let hero = &mut self.heroes[index];
            let enemy = &mut self.enemies[target];
            hero.set_state(UnitState::Attacking);
            if let Some(outcome) = hero.attack.attack_target(now, enemy) {
                push_damage(&mut self.pending, hero.id, enemy.id, outcome, DamageCause::Attack);
            }
        } else if targeting::stronghold_in_reach(&self.heroes[index], &self.enemy_base) {
            let hero = &mut self.heroes[index];
            hero.set_state(UnitState::Attacking);
            if let Some(outcome) = hero.attack.attack_target(now, &mut self.enemy_base) {
                if outcome.dealt > 0.0 {
                    self.pending.push(SimEvent::StrongholdDamaged {
                        side: Side::Enemy,
                        source: hero.id,
                        amount: outcome.dealt,
                        remaining: self.enemy_base.health(),
                        cause: DamageCause::Attack,
                    });
                }
                if outcome.killed {
                    info!("Enemy stronghold destroyed by {}", hero.label());
                }
            }
        } else {
            let hero = &mut self.heroes[index];
            hero.set_state(UnitState::Moving);
            hero.advance();
        }

        self.try_hero_skill(index, now);
    }

    /// Roll the hero's skill against its role's candidate set. A skill use
    /// does not block the attack made earlier in the same tick.
    ///
    /// An empty candidate set does not stop the cast: the skill still fires,
    /// goes on cooldown and channels, it just changes nothing.
    fn try_hero_skill(&mut self, index: usize, now: Timestamp) {
        let Some(slot) = self.heroes[index].skill.as_ref() else {
            return;
        };
        if !slot.skill.cooldown_ready(now) {
            return;
        }
        let candidates =
            targeting::skill_candidates(index, slot.targeting, &self.heroes, &self.enemies);
        let Some(mut slot) = self.heroes[index].skill.take() else {
            return;
        };

        let rng = &mut self.rng;
        let impacts = match &candidates {
            SkillCandidates::Allies(indices) => caster_and_allies(&mut self.heroes, index, indices)
                .and_then(|(caster, mut allies)| {
                    slot.skill.use_skill(now, || rng.random_f32(), caster, &mut allies)
                }),
            SkillCandidates::Enemies(indices) => {
                let mut targets = select_mut(&mut self.enemies, indices);
                slot.skill
                    .use_skill(now, || rng.random_f32(), &mut self.heroes[index], &mut targets)
            }
        };

        if let Some(impacts) = impacts {
            let caster = &self.heroes[index];
            let (caster_id, origin) = (caster.id, caster.position);
            debug!("{} used {} on {} candidates", caster.label(), slot.skill.name, impacts.len());
            self.pending.push(SimEvent::SkillUsed {
                caster: caster_id,
                skill: slot.skill.name.clone(),
            });
            self.record_impacts(caster_id, &slot.skill.name, impacts);

            if let (SkillEffect::AreaDamage { .. }, SkillCandidates::Enemies(indices)) =
                (slot.skill.effect(), &candidates)
            {
                for &target in indices.iter() {
                    self.launch_ember(caster_id, origin, &slot.skill, target);
                }
            }
        }

        self.heroes[index].skill = Some(slot);
    }

    /// Send a projectile carrying `skill`'s effect at `enemies[target]`.
    fn launch_ember(&mut self, caster: UnitId, origin: Vec2, skill: &Skill, target: usize) {
        let Some(enemy) = self.enemies.get(target) else {
            return;
        };
        let id = ProjectileId(self.next_projectile_id);
        let tuning = &self.config.tuning;
        let payload = ProjectilePayload::SkillEffect {
            caster,
            caster_x: origin.x,
            skill_name: skill.name.clone(),
            target: enemy.id,
            effect: skill.effect().clone(),
        };
        match Projectile::new(
            id,
            caster,
            origin,
            enemy.position,
            tuning.projectile_speed,
            tuning.projectile_max_range,
            payload,
        ) {
            Ok(projectile) => {
                self.next_projectile_id += 1;
                self.pending.push(SimEvent::ProjectileLaunched {
                    projectile: id,
                    source: caster,
                    target: enemy.id,
                });
                self.projectiles
                    .push(projectile.with_tolerance(tuning.arrival_tolerance));
            }
            Err(e) => warn!("Failed to launch projectile from {}: {}", caster, e),
        }
    }

    fn tick_enemy(&mut self, index: usize, now: Timestamp) {
        if !self.enemies[index].is_alive() {
            return;
        }

        let target = targeting::enemy_attack_target(&self.enemies[index], &self.heroes, &self.rules);
        let enemy = &mut self.enemies[index];
        match target {
            Some(target) => {
                let hero = &mut self.heroes[target];
                enemy.set_state(UnitState::Attacking);
                if let Some(outcome) = enemy.attack.attack_target(now, hero) {
                    push_damage(&mut self.pending, enemy.id, hero.id, outcome, DamageCause::Attack);
                }
            }
            None => {
                enemy.set_state(UnitState::Moving);
                enemy.advance();
            }
        }

        if enemy.is_alive() && enemy.x() <= self.config.tuning.breach_x {
            let dealt = self.player_stronghold.take_damage(self.config.tuning.breach_damage);
            enemy.kill(now);
            info!(
                "{} breached the player stronghold ({} health left)",
                enemy.label(),
                self.player_stronghold.health()
            );
            self.pending.push(SimEvent::StrongholdDamaged {
                side: Side::Player,
                source: enemy.id,
                amount: dealt,
                remaining: self.player_stronghold.health(),
                cause: DamageCause::Breach,
            });
        }
    }

    fn step_projectiles(&mut self, now: Timestamp) {
        let mut arrivals = Vec::new();
        for projectile in &mut self.projectiles {
            match projectile.step() {
                ProjectileStep::Arrived(payload) => arrivals.push(payload),
                ProjectileStep::Expired => {
                    debug!("Projectile {:?} expired", projectile.id);
                    self.pending.push(SimEvent::ProjectileExpired {
                        projectile: projectile.id,
                    });
                }
                ProjectileStep::InFlight | ProjectileStep::Inactive => {}
            }
        }
        self.projectiles.retain(Projectile::is_alive);

        for payload in arrivals {
            self.resolve_payload(payload, now);
        }
    }

    fn resolve_payload(&mut self, payload: ProjectilePayload, now: Timestamp) {
        let ProjectilePayload::SkillEffect {
            caster,
            caster_x,
            skill_name,
            target,
            effect,
        } = payload;

        let caster_x = self
            .heroes
            .iter()
            .find(|hero| hero.id == caster && hero.is_alive())
            .map_or(caster_x, Unit::x);
        let Some(unit) = self.enemies.iter_mut().find(|enemy| enemy.id == target) else {
            return;
        };
        let ctx = EffectContext {
            caster,
            caster_x,
            now,
        };
        let impacts = effect.apply(&ctx, &mut [unit]);
        self.record_impacts(caster, &skill_name, impacts);
    }

    fn record_impacts(&mut self, source: UnitId, skill: &str, impacts: Vec<EffectImpact>) {
        for impact in impacts {
            match impact {
                EffectImpact::Damaged { target, outcome } => push_damage(
                    &mut self.pending,
                    source,
                    target,
                    outcome,
                    DamageCause::Skill(skill.to_string()),
                ),
                EffectImpact::Healed { target, amount } => {
                    self.pending.push(SimEvent::Healed {
                        source,
                        target,
                        amount,
                    });
                }
                EffectImpact::Buffed { target, cooldown } => {
                    self.pending.push(SimEvent::AttackSpeedBuffed {
                        source,
                        target,
                        cooldown,
                    });
                }
            }
        }
    }

    fn repair_units(&mut self, now: Timestamp) {
        for unit in self.heroes.iter_mut().chain(self.enemies.iter_mut()) {
            if let Some(problem) = unit.repair_invariants(now) {
                warn!("Repaired {}: {}", unit.label(), problem);
            }
        }
    }

    /// The only place units leave the active collections.
    fn sweep(&mut self, now: Timestamp) {
        let (fallen, standing): (Vec<Unit>, Vec<Unit>) =
            std::mem::take(&mut self.heroes).into_iter().partition(|unit| !unit.is_alive());
        self.heroes = standing;
        for unit in fallen {
            if let Role::Hero(role) = unit.role {
                info!("{} was defeated", unit.label());
                self.pending.push(SimEvent::HeroDefeated { unit: unit.id, role });
            }
            self.dying_heroes.push(unit);
        }

        let (fallen, standing): (Vec<Unit>, Vec<Unit>) =
            std::mem::take(&mut self.enemies).into_iter().partition(|unit| !unit.is_alive());
        self.enemies = standing;
        for unit in fallen {
            if let Role::Enemy(variant) = unit.role {
                debug!("{} was defeated", unit.label());
                self.pending.push(SimEvent::EnemyDefeated {
                    unit: unit.id,
                    variant,
                });
            }
            self.dying_enemies.push(unit);
        }

        for dying in [&mut self.dying_heroes, &mut self.dying_enemies] {
            let (finished, remaining): (Vec<Unit>, Vec<Unit>) = std::mem::take(dying)
                .into_iter()
                .partition(|unit| unit.death_finished(now));
            *dying = remaining;
            self.pending
                .extend(finished.into_iter().map(|unit| SimEvent::UnitRemoved { unit: unit.id }));
        }
    }

    fn check_outcome(&mut self) {
        let outcome = if self.player_stronghold.is_destroyed() {
            BattleOutcome::Defeat
        } else if !self.enemy_base.is_alive() {
            BattleOutcome::Victory
        } else {
            return;
        };
        info!("Battle ended: {:?} after {} ticks", outcome, self.tick_count);
        self.outcome = Some(outcome);
        self.pending.push(SimEvent::BattleEnded { outcome });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }

    pub fn heroes(&self) -> &[Unit] {
        &self.heroes
    }

    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    pub fn dying_heroes(&self) -> &[Unit] {
        &self.dying_heroes
    }

    pub fn dying_enemies(&self) -> &[Unit] {
        &self.dying_enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// (player, enemy) stronghold health
    pub fn stronghold_health(&self) -> (f32, f32) {
        (self.player_stronghold.health(), self.enemy_base.health())
    }

    pub fn player_stronghold(&self) -> &Stronghold {
        &self.player_stronghold
    }

    pub fn enemy_base(&self) -> &BaseTarget {
        &self.enemy_base
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn economy_snapshot(&self) -> EconomySnapshot {
        self.economy.snapshot()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_tick(&self) -> Option<Timestamp> {
        self.last_tick
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed
    }

    /// Find a unit on the field, active or dying.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.heroes
            .iter()
            .chain(&self.enemies)
            .chain(&self.dying_heroes)
            .chain(&self.dying_enemies)
            .find(|unit| unit.id == id)
    }

    /// Mutable access to an active unit.
    ///
    /// Meant for setting up scenarios between ticks only. Writes made here
    /// bypass the attack and effect paths, so no events are emitted for them;
    /// out-of-range health is clamped by the next tick's invariant repair.
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.heroes
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|unit| unit.id == id)
    }
}

fn push_damage(
    events: &mut Vec<SimEvent>,
    source: UnitId,
    target: UnitId,
    outcome: DamageOutcome,
    cause: DamageCause,
) {
    if outcome.dealt > 0.0 {
        events.push(SimEvent::DamageDealt {
            source,
            target,
            amount: outcome.dealt,
            cause,
        });
    }
}

/// Borrow `units[caster]` and the units at `indices` mutably at once.
fn caster_and_allies<'a>(
    units: &'a mut [Unit],
    caster: usize,
    indices: &[usize],
) -> Option<(&'a mut Unit, Vec<&'a mut Unit>)> {
    let mut found = None;
    let mut allies = Vec::with_capacity(indices.len());
    for (index, unit) in units.iter_mut().enumerate() {
        if index == caster {
            found = Some(unit);
        } else if indices.contains(&index) {
            allies.push(unit);
        }
    }
    found.map(|caster| (caster, allies))
}

fn select_mut<'a>(units: &'a mut [Unit], indices: &[usize]) -> Vec<&'a mut Unit> {
    units
        .iter_mut()
        .enumerate()
        .filter(|(index, _)| indices.contains(index))
        .map(|(_, unit)| unit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_sim() -> Simulation {
        let mut sim = Simulation::new(LaneConfig::default(), GameRng::from_seed(1)).unwrap();
        sim.set_enemy_waves(false);
        sim
    }

    #[test]
    fn test_spawn_hero_spends_energy() {
        let mut sim = quiet_sim();
        let id = sim.spawn_hero(HeroRole::Archer, 0.0).unwrap();
        let events = sim.advance_tick(0.0);

        assert!(events.contains(&SimEvent::HeroSpawned { unit: id, role: HeroRole::Archer }));
        assert!(events.contains(&SimEvent::EnergySpent { amount: 20.0 }));
        assert!((sim.economy().energy() - 80.1).abs() < 1e-4);
    }

    #[test]
    fn test_deploy_cooldown_blocks_same_role() {
        let mut sim = quiet_sim();
        assert!(sim.spawn_hero(HeroRole::Warrior, 0.0).is_some());
        assert!(sim.spawn_hero(HeroRole::Warrior, 1.0).is_none());
        assert!(sim.spawn_hero(HeroRole::Archer, 1.0).is_some());
        assert!(sim.spawn_hero(HeroRole::Warrior, 2.0).is_some());
    }

    #[test]
    fn test_spawn_refused_when_poor() {
        let mut sim = quiet_sim();
        sim.economy.spend(95.0);
        assert!(sim.spawn_hero(HeroRole::Warrior, 0.0).is_none());
        assert!(sim.advance_tick(0.0).is_empty());
    }

    #[test]
    fn test_backwards_clock_is_held() {
        let mut sim = quiet_sim();
        sim.advance_tick(5.0);
        sim.advance_tick(4.0);
        assert_eq!(sim.last_tick(), Some(5.0));
        assert_eq!(sim.tick_count(), 2);
    }

    #[test]
    fn test_paused_ignores_ticks() {
        let mut sim = quiet_sim();
        sim.spawn_hero(HeroRole::Warrior, 0.0);
        sim.set_paused(true);
        let x = sim.heroes()[0].x();
        sim.advance_tick(0.1);
        assert_eq!(sim.heroes()[0].x(), x);
        assert_eq!(sim.tick_count(), 0);
    }

    #[test]
    fn test_waves_spawn_after_interval() {
        let mut sim = Simulation::new(LaneConfig::default(), GameRng::from_seed(3)).unwrap();
        sim.advance_tick(0.0);
        assert!(sim.enemies().is_empty());
        sim.advance_tick(2.0);
        assert_eq!(sim.enemies().len(), 1);
    }

    #[test]
    fn test_breach_damages_player_stronghold() {
        let mut sim = quiet_sim();
        let id = sim.spawn_enemy(EnemyVariant::BlueSlime, 0.0).unwrap();
        sim.unit_mut(id).unwrap().position.x = 51.0;

        let events = sim.advance_tick(0.1);

        assert_eq!(sim.stronghold_health().0, 95.0);
        assert!(sim.enemies().is_empty());
        assert_eq!(sim.dying_enemies().len(), 1);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::StrongholdDamaged { side: Side::Player, cause: DamageCause::Breach, .. }
        )));
        assert!(events.contains(&SimEvent::EnemyDefeated { unit: id, variant: EnemyVariant::BlueSlime }));
    }

    #[test]
    fn test_dying_units_removed_after_death_duration() {
        let mut sim = quiet_sim();
        let id = sim.spawn_enemy(EnemyVariant::RedSlime, 0.0).unwrap();
        sim.unit_mut(id).unwrap().kill(0.0);
        sim.advance_tick(0.0);
        assert_eq!(sim.dying_enemies().len(), 1);

        let events = sim.advance_tick(1.0);
        assert!(sim.dying_enemies().is_empty());
        assert!(events.contains(&SimEvent::UnitRemoved { unit: id }));
        assert!(sim.unit(id).is_none());
    }

    #[test]
    fn test_victory_ends_battle_once() {
        let mut sim = quiet_sim();
        let id = sim.spawn_hero(HeroRole::Warrior, 0.0).unwrap();
        let proxy_x = sim.enemy_base().x();
        sim.unit_mut(id).unwrap().position.x = proxy_x - 30.0;

        let mut ended = 0;
        for tick in 0..40 {
            let events = sim.advance_tick(tick as f32 * 0.5);
            ended += events
                .iter()
                .filter(|e| matches!(e, SimEvent::BattleEnded { .. }))
                .count();
        }
        assert_eq!(sim.outcome(), Some(BattleOutcome::Victory));
        assert_eq!(ended, 1);
        assert_eq!(sim.stronghold_health().1, 0.0);
        assert!(sim.spawn_hero(HeroRole::Archer, 100.0).is_none());
    }

    #[test]
    fn test_mage_aoe_launches_embers() {
        let mut config = LaneConfig::default();
        if let Some(skill) = config
            .heroes
            .get_mut(&HeroRole::Mage)
            .and_then(|preset| preset.stats.skill.as_mut())
        {
            skill.chance = 1.0;
        }
        let mut sim = Simulation::new(config, GameRng::from_seed(9)).unwrap();
        sim.set_enemy_waves(false);
        let mage = sim.spawn_hero(HeroRole::Mage, 0.0).unwrap();
        let enemy = sim.spawn_enemy(EnemyVariant::GreenSlime, 0.0).unwrap();
        sim.unit_mut(enemy).unwrap().position.x = 130.0;

        let events = sim.advance_tick(0.0);

        assert!(events.contains(&SimEvent::SkillUsed { caster: mage, skill: "AOE".to_string() }));
        assert_eq!(sim.projectiles().len(), 1);
        assert!(matches!(sim.unit(mage).unwrap().state(), UnitState::Channeling { .. }));
    }
}

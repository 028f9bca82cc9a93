//! Integration tests for the lane simulation core
//!
//! These tests verify that:
//! - Attacks and skills respect their cooldown gates
//! - Heals and attack-speed buffs stay within their bounds
//! - Projectiles deliver their payload at most once
//! - The economy regenerates, upgrades and caps as configured
//! - A unit killed mid-tick drops out of every later decision in that tick
//! - A cast keeps the tick's attack, and channeling blocks moving and attacking
//! - Health stays within bounds over a full seeded battle

use bevy::math::Vec2;
use lanesim::lane::constants::MIN_ATTACK_COOLDOWN;
use lanesim::lane::{
    Attack, BattleOutcome, DamageCause, Damageable, Economy, EnemyVariant, GameRng, HeroRole,
    LaneConfig, Projectile, ProjectileId, ProjectilePayload, ProjectileStep, Role, SimEvent,
    Simulation, Skill, SkillEffect, Unit, UnitId, UnitState,
};

fn hero(id: u32, role: HeroRole, x: f32) -> Unit {
    let config = LaneConfig::default();
    let preset = &config.hero(role).unwrap().stats;
    Unit::from_preset(UnitId(id), Role::Hero(role), preset, Vec2::new(x, 360.0)).unwrap()
}

fn slime(id: u32, x: f32) -> Unit {
    let config = LaneConfig::default();
    let preset = config.enemy(EnemyVariant::GreenSlime).unwrap();
    Unit::from_preset(UnitId(id), Role::Enemy(EnemyVariant::GreenSlime), preset, Vec2::new(x, 360.0))
        .unwrap()
}

fn quiet_simulation(seed: u64) -> Simulation {
    let mut sim = Simulation::new(LaneConfig::default(), GameRng::from_seed(seed)).unwrap();
    sim.set_enemy_waves(false);
    sim
}

fn damage_to(events: &[SimEvent], target: UnitId) -> Vec<f32> {
    events
        .iter()
        .filter_map(|event| match event {
            SimEvent::DamageDealt { target: t, amount, .. } if *t == target => Some(*amount),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Attack and Skill Gating
// ============================================================================

#[test]
fn test_attack_twice_within_cooldown_hits_once() {
    let mut attack = Attack::new(15.0, 0.5).unwrap();
    let mut target = slime(2, 100.0);

    assert!(attack.attack_target(1.0, &mut target).is_some());
    assert!(
        attack.attack_target(1.3, &mut target).is_none(),
        "Second attack inside the cooldown should be refused"
    );
    assert_eq!(target.health(), 185.0, "Damage should be applied exactly once");
    assert_eq!(attack.last_fired(), Some(1.0));

    assert!(attack.attack_target(1.5, &mut target).is_some());
    assert_eq!(target.health(), 170.0);
}

#[test]
fn test_cooldown_blocked_skill_keeps_last_used() {
    let mut skill = Skill::new(
        "Buff",
        5.0,
        1.0,
        0.3,
        SkillEffect::BuffAttackSpeed { amount: 0.5, duration: 5.0 },
    )
    .unwrap();

    assert!(skill.try_activate(0.0, || 0.0));
    assert_eq!(skill.last_used(), Some(0.0));

    let blocked = skill.try_activate(2.0, || panic!("roll drawn while on cooldown"));
    assert!(!blocked);
    assert_eq!(skill.last_used(), Some(0.0), "Blocked use must not touch last_used");

    assert!(skill.try_activate(5.0, || 0.0));
    assert_eq!(skill.last_used(), Some(5.0));
}

#[test]
fn test_failed_roll_keeps_skill_ready() {
    let mut skill = Skill::new(
        "AOE",
        3.0,
        0.6,
        0.3,
        SkillEffect::AreaDamage { radius: 100.0, damage: 20.0 },
    )
    .unwrap();

    assert!(!skill.try_activate(0.0, || 0.9));
    assert_eq!(skill.last_used(), None);
    assert!(skill.cooldown_ready(0.1));
}

// ============================================================================
// Skill Effects
// ============================================================================

#[test]
fn test_group_heal_on_full_health_counts_as_used() {
    let mut skill = Skill::new("Group Heal", 5.0, 1.0, 1.5, SkillEffect::GroupHeal { amount: 15.0 })
        .unwrap();
    let mut healer = hero(1, HeroRole::Healer, 50.0);
    let mut ally = hero(2, HeroRole::Warrior, 60.0);

    let impacts = skill.use_skill(0.0, || 0.0, &mut healer, &mut [&mut ally]);

    assert_eq!(impacts, Some(vec![]), "Full-health target is applied to but not changed");
    assert_eq!(ally.health(), ally.max_health());
    assert_eq!(skill.last_used(), Some(0.0));
    assert!(matches!(healer.state(), UnitState::Channeling { .. }));
}

#[test]
fn test_group_heal_never_exceeds_max_health() {
    let effect = SkillEffect::GroupHeal { amount: 15.0 };
    let mut ally = hero(2, HeroRole::Archer, 60.0);
    ally.receive_damage(10.0, 0.0);

    let ctx = lanesim::lane::EffectContext {
        caster: UnitId(1),
        caster_x: 50.0,
        now: 0.0,
    };
    effect.apply(&ctx, &mut [&mut ally]);

    assert_eq!(ally.health(), ally.max_health());
}

#[test]
fn test_attack_speed_buff_floor_and_no_compounding() {
    let mut attack = Attack::new(10.0, 0.5).unwrap();

    attack.apply_speed_buff(0.5, 5.0);
    assert_eq!(attack.cooldown(), MIN_ATTACK_COOLDOWN, "Cooldown should stop at the floor");

    let mut attack = Attack::new(10.0, 0.5).unwrap();
    attack.apply_speed_buff(0.3, 5.0);
    let first = attack.cooldown();
    attack.apply_speed_buff(0.3, 6.0);
    assert!(
        (attack.cooldown() - first).abs() < 1e-6,
        "Re-buffing should refresh, not compound ({} vs {})",
        attack.cooldown(),
        first
    );
    assert!((first - 0.2).abs() < 1e-6);

    assert_eq!(attack.expire_buff(5.5), None, "Refreshed buff should still be active");
    assert_eq!(attack.expire_buff(6.0), Some(0.5));
    assert_eq!(attack.cooldown(), 0.5);
}

// ============================================================================
// Projectiles
// ============================================================================

fn ember_payload() -> ProjectilePayload {
    ProjectilePayload::SkillEffect {
        caster: UnitId(1),
        caster_x: 0.0,
        skill_name: "AOE".to_string(),
        target: UnitId(2),
        effect: SkillEffect::AreaDamage { radius: 100.0, damage: 20.0 },
    }
}

#[test]
fn test_projectile_at_own_target_expires_without_payload() {
    let point = Vec2::new(100.0, 360.0);
    let mut projectile =
        Projectile::new(ProjectileId(1), UnitId(1), point, point, 4.0, 300.0, ember_payload()).unwrap();

    assert_eq!(projectile.step(), ProjectileStep::Expired);
    assert!(!projectile.is_alive());
    assert_eq!(projectile.step(), ProjectileStep::Inactive);
}

#[test]
fn test_projectile_arrives_exactly_once() {
    let mut projectile = Projectile::new(
        ProjectileId(1),
        UnitId(1),
        Vec2::ZERO,
        Vec2::new(10.0, 0.0),
        4.0,
        300.0,
        ember_payload(),
    )
    .unwrap();

    let arrivals = (0..5)
        .map(|_| projectile.step())
        .filter(|step| matches!(step, ProjectileStep::Arrived(_)))
        .count();

    assert_eq!(arrivals, 1, "Payload should be delivered exactly once");
    assert!(!projectile.is_alive());
}

// ============================================================================
// Economy
// ============================================================================

#[test]
fn test_spend_then_regenerate() {
    let mut economy = Economy::default();
    economy.spend(20.0);
    economy.regenerate();
    assert!((economy.energy() - 80.1).abs() < 1e-4, "Energy was {}", economy.energy());
}

#[test]
fn test_upgrade_refused_after_five_clicks() {
    let mut economy = Economy::default();

    for click in 0..5 {
        for _ in 0..10_000 {
            if economy.can_upgrade() {
                break;
            }
            economy.regenerate();
        }
        assert!(economy.upgrade().is_some(), "Upgrade {} should succeed", click + 1);
    }
    assert_eq!(economy.upgrade_clicks(), 5);

    for _ in 0..10_000 {
        economy.regenerate();
    }
    assert_eq!(economy.energy(), economy.max_energy());
    assert!(economy.energy() > economy.upgrade_cost());
    assert!(!economy.can_upgrade());
    assert_eq!(economy.upgrade(), None);
    assert_eq!(economy.snapshot().next_upgrade_cost, None);
}

#[test]
fn test_simulation_upgrade_reports_spend() {
    let mut sim = quiet_simulation(1);
    assert!(sim.upgrade_economy());

    let events = sim.advance_tick(0.0);
    assert!(events.contains(&SimEvent::EnergyUpgraded {
        clicks: 1,
        cost: 20.0,
        max_energy: 110.0
    }));
    assert!(events.contains(&SimEvent::EnergySpent { amount: 20.0 }));
}

// ============================================================================
// Tick Scenarios
// ============================================================================

#[test]
fn test_warrior_in_range_hits_once_per_tick() {
    let mut sim = quiet_simulation(2);
    let warrior = sim.spawn_hero(HeroRole::Warrior, 0.0).unwrap();
    let enemy = sim.spawn_enemy(EnemyVariant::BlueSlime, 0.0).unwrap();
    let warrior_x = sim.unit(warrior).unwrap().x();
    sim.unit_mut(enemy).unwrap().position.x = warrior_x + 35.0;

    let events = sim.advance_tick(0.0);
    assert_eq!(damage_to(&events, enemy), vec![15.0]);
    assert_eq!(sim.unit(enemy).unwrap().health(), 185.0);

    let events = sim.advance_tick(0.2);
    assert!(damage_to(&events, enemy).is_empty(), "Warrior is still on cooldown");
    assert_eq!(sim.unit(enemy).unwrap().health(), 185.0);
}

#[test]
fn test_kill_mid_tick_excludes_target() {
    let mut sim = quiet_simulation(3);
    let warrior = sim.spawn_hero(HeroRole::Warrior, 0.0).unwrap();
    let archer = sim.spawn_hero(HeroRole::Archer, 0.0).unwrap();
    let enemy = sim.spawn_enemy(EnemyVariant::RedSlime, 0.0).unwrap();
    {
        let slime = sim.unit_mut(enemy).unwrap();
        slime.position.x = 85.0;
        slime.receive_damage(190.0, 0.0);
    }

    let events = sim.advance_tick(0.0);

    let hits: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, SimEvent::DamageDealt { target, .. } if *target == enemy))
        .collect();
    assert_eq!(hits.len(), 1, "Only the killing blow should land");
    assert_eq!(
        hits[0],
        &SimEvent::DamageDealt {
            source: warrior,
            target: enemy,
            amount: 10.0,
            cause: DamageCause::Attack
        }
    );

    let dead = sim.unit(enemy).unwrap();
    assert!(!dead.is_alive());
    assert!(dead.is_dying());
    assert!(sim.enemies().is_empty());
    assert_eq!(sim.dying_enemies().len(), 1);

    assert_eq!(
        sim.unit(archer).unwrap().attack.last_fired(),
        None,
        "Archer should not have attacked the dead slime"
    );
    assert!(events.contains(&SimEvent::EnemyDefeated {
        unit: enemy,
        variant: EnemyVariant::RedSlime
    }));
}

#[test]
fn test_health_stays_in_bounds_over_battle() {
    let mut sim = Simulation::new(LaneConfig::default(), GameRng::from_seed(7)).unwrap();
    let plan = [HeroRole::Warrior, HeroRole::Archer, HeroRole::Healer, HeroRole::Mage];
    let mut next = 0;

    for tick in 0..6_000 {
        let now = tick as f32 / 60.0;
        if sim.spawn_hero(plan[next], now).is_some() {
            next = (next + 1) % plan.len();
        }
        sim.advance_tick(now);

        for unit in sim
            .heroes()
            .iter()
            .chain(sim.enemies())
            .chain(sim.dying_heroes())
            .chain(sim.dying_enemies())
        {
            assert!(
                (0.0..=unit.max_health()).contains(&unit.health()),
                "{} health {} out of bounds at tick {}",
                unit.label(),
                unit.health(),
                tick
            );
        }
        let (player, enemy) = sim.stronghold_health();
        assert!((0.0..=100.0).contains(&player));
        assert!((0.0..=100.0).contains(&enemy));

        if sim.outcome().is_some() {
            break;
        }
    }
}

#[test]
fn test_undefended_lane_ends_in_defeat() {
    let mut sim = Simulation::new(LaneConfig::default(), GameRng::from_seed(11)).unwrap();

    let mut ended = Vec::new();
    let mut now = 0.0;
    for tick in 0..20_000 {
        now = tick as f32 / 60.0;
        ended.extend(
            sim.advance_tick(now)
                .into_iter()
                .filter(|event| matches!(event, SimEvent::BattleEnded { .. })),
        );
        if sim.outcome().is_some() {
            break;
        }
    }

    assert_eq!(sim.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(sim.stronghold_health().0, 0.0);
    assert_eq!(ended, vec![SimEvent::BattleEnded { outcome: BattleOutcome::Defeat }]);

    let ticks = sim.tick_count();
    assert!(sim.advance_tick(now + 1.0).is_empty(), "Ticks after the outcome are no-ops");
    assert_eq!(sim.tick_count(), ticks);
    assert!(sim.spawn_enemy(EnemyVariant::BlueSlime, now + 1.0).is_none());
}

// ============================================================================
// Skills Inside the Tick
// ============================================================================

fn skill_uses(events: &[SimEvent], caster: UnitId) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, SimEvent::SkillUsed { caster: c, .. } if *c == caster))
        .count()
}

fn attacks_by(events: &[SimEvent], source: UnitId) -> usize {
    events
        .iter()
        .filter(|event| {
            matches!(
                event,
                SimEvent::DamageDealt { source: s, cause: DamageCause::Attack, .. } if *s == source
            )
        })
        .count()
}

#[test]
fn test_lone_healer_still_casts_group_heal() {
    let mut sim = quiet_simulation(5);
    let healer = sim.spawn_hero(HeroRole::Healer, 0.0).unwrap();

    let events = sim.advance_tick(0.0);
    assert_eq!(skill_uses(&events, healer), 1, "Ready skill with chance 1.0 should fire alone");
    assert!(matches!(
        sim.unit(healer).unwrap().state(),
        UnitState::Channeling { .. }
    ));
    assert_eq!(sim.unit(healer).unwrap().skill.as_ref().unwrap().skill.last_used(), Some(0.0));

    let mut casts = 1;
    let mut heals = 0;
    for tick in 1..200 {
        let events = sim.advance_tick(tick as f32 / 10.0);
        casts += skill_uses(&events, healer);
        heals += events
            .iter()
            .filter(|event| matches!(event, SimEvent::Healed { .. }))
            .count();
    }
    assert_eq!(casts, 4, "One cast per 5s cooldown window over 20s");
    assert_eq!(heals, 0, "Nobody was wounded");
}

#[test]
fn test_skill_keeps_attack_then_channel_blocks_actions() {
    let mut sim = quiet_simulation(6);
    let healer = sim.spawn_hero(HeroRole::Healer, 0.0).unwrap();
    let enemy = sim.spawn_enemy(EnemyVariant::BlueSlime, 0.0).unwrap();
    let start_x = sim.unit(healer).unwrap().x();
    sim.unit_mut(enemy).unwrap().position.x = start_x + 100.0;

    let events = sim.advance_tick(0.0);
    assert_eq!(attacks_by(&events, healer), 1, "Casting should not cancel the same tick's attack");
    assert_eq!(skill_uses(&events, healer), 1);
    assert!(matches!(
        sim.unit(healer).unwrap().state(),
        UnitState::Channeling { .. }
    ));

    // Attack cooldown (1.0s) is ready again before the 1.5s cast ends
    for now in [1.0, 1.2] {
        let events = sim.advance_tick(now);
        assert_eq!(attacks_by(&events, healer), 0, "Channeling hero attacked at {}", now);
        assert_eq!(sim.unit(healer).unwrap().x(), start_x, "Channeling hero moved at {}", now);
    }
    assert_eq!(sim.unit(healer).unwrap().attack.last_fired(), Some(0.0));

    let events = sim.advance_tick(1.5);
    assert_eq!(attacks_by(&events, healer), 1, "Attacks resume once the cast ends");
    assert_eq!(sim.unit(enemy).unwrap().health(), 194.0);
}

//! Integration tests for the combat log and battle analytics
//!
//! These tests verify that:
//! - Simulation events become readable, structured log entries
//! - Filtering and aggregation work on the structured fields
//! - Analytics windows reset while totals keep accumulating

use lanesim::combat::analytics::BattleAnalytics;
use lanesim::combat::log::{CombatLog, CombatLogEventType};
use lanesim::lane::{
    BattleOutcome, DamageCause, EnemyVariant, HeroRole, ProjectileId, Side, SimEvent, UnitId,
};

const WARRIOR: UnitId = UnitId(1);
const MAGE: UnitId = UnitId(2);
const SLIME: UnitId = UnitId(3);

fn skirmish() -> Vec<SimEvent> {
    vec![
        SimEvent::HeroSpawned { unit: WARRIOR, role: HeroRole::Warrior },
        SimEvent::EnergySpent { amount: 10.0 },
        SimEvent::HeroSpawned { unit: MAGE, role: HeroRole::Mage },
        SimEvent::EnergySpent { amount: 20.0 },
        SimEvent::EnemySpawned { unit: SLIME, variant: EnemyVariant::BlueSlime },
        SimEvent::DamageDealt {
            source: WARRIOR,
            target: SLIME,
            amount: 15.0,
            cause: DamageCause::Attack,
        },
        SimEvent::DamageDealt {
            source: SLIME,
            target: WARRIOR,
            amount: 20.0,
            cause: DamageCause::Attack,
        },
        SimEvent::SkillUsed { caster: MAGE, skill: "AOE".to_string() },
        SimEvent::DamageDealt {
            source: MAGE,
            target: SLIME,
            amount: 20.0,
            cause: DamageCause::Skill("AOE".to_string()),
        },
        SimEvent::ProjectileLaunched { projectile: ProjectileId(1), source: MAGE, target: SLIME },
        SimEvent::DamageDealt {
            source: MAGE,
            target: SLIME,
            amount: 10.0,
            cause: DamageCause::Attack,
        },
        SimEvent::Healed { source: MAGE, target: WARRIOR, amount: 5.0 },
        SimEvent::DamageDealt {
            source: WARRIOR,
            target: SLIME,
            amount: 15.0,
            cause: DamageCause::Attack,
        },
        SimEvent::EnemyDefeated { unit: SLIME, variant: EnemyVariant::BlueSlime },
        SimEvent::UnitRemoved { unit: SLIME },
        SimEvent::StrongholdDamaged {
            side: Side::Enemy,
            source: WARRIOR,
            amount: 15.0,
            remaining: 85.0,
            cause: DamageCause::Attack,
        },
    ]
}

fn recorded_log() -> CombatLog {
    let mut log = CombatLog::default();
    for (index, event) in skirmish().iter().enumerate() {
        log.match_time = index as f32 * 0.5;
        log.record(event);
    }
    log
}

// ============================================================================
// Recording
// ============================================================================

#[test]
fn test_spawns_register_display_names() {
    let log = recorded_log();

    assert_eq!(log.name_of(WARRIOR), "Warrior #1");
    assert_eq!(log.name_of(SLIME), "Blue Slime #3");
    assert_eq!(log.name_of(UnitId(99)), "Unit #99");

    let first_hit = &log.filter_by_type(CombatLogEventType::Damage)[0];
    assert_eq!(first_hit.source.as_deref(), Some("Warrior #1"));
    assert_eq!(first_hit.target.as_deref(), Some("Blue Slime #3"));
    assert_eq!(first_hit.ability.as_deref(), Some("attack"));
    assert!(first_hit.message.contains("15"), "Message was: {}", first_hit.message);
}

#[test]
fn test_unit_removal_is_not_logged() {
    let log = recorded_log();
    // Every event but the removal produces an entry
    assert_eq!(log.entries.len(), skirmish().len() - 1);
}

#[test]
fn test_entries_keep_match_time() {
    let log = recorded_log();
    let death = &log.filter_by_type(CombatLogEventType::Death)[0];
    assert_eq!(death.timestamp, 13.0 * 0.5);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_filter_and_count_by_type() {
    let log = recorded_log();
    let counts = log.count_by_type();

    assert_eq!(counts.get(&CombatLogEventType::Spawn), Some(&3));
    assert_eq!(counts.get(&CombatLogEventType::Economy), Some(&2));
    assert_eq!(counts.get(&CombatLogEventType::Damage), Some(&6));
    assert_eq!(counts.get(&CombatLogEventType::SkillUsed), Some(&1));
    assert_eq!(counts.get(&CombatLogEventType::Projectile), Some(&1));
    assert_eq!(counts.get(&CombatLogEventType::Healing), Some(&1));
    assert_eq!(counts.get(&CombatLogEventType::Death), Some(&1));
    assert_eq!(counts.get(&CombatLogEventType::MatchEvent), None);
}

#[test]
fn test_hp_changes_only() {
    let log = recorded_log();
    let changes = log.hp_changes_only();

    assert_eq!(changes.len(), 7);
    assert!(changes.iter().all(|e| e.event_type.changes_health()));
}

#[test]
fn test_hp_changes_skip_entries_without_amount() {
    let mut log = recorded_log();
    log.log(CombatLogEventType::Healing, "Heal fizzled".to_string());
    log.log_structured(
        CombatLogEventType::Damage,
        "Glancing blow".to_string(),
        Some("Warrior #1".to_string()),
        Some("Blue Slime #3".to_string()),
        Some(0.0),
    );

    assert_eq!(log.hp_changes_only().len(), 7, "Entries that moved no health are skipped");
    assert_eq!(log.filter_by_type(CombatLogEventType::Healing).len(), 2);
    assert!(!CombatLogEventType::Spawn.changes_health());
}

#[test]
fn test_recent_keeps_order() {
    let log = recorded_log();
    let recent = log.recent(2);

    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].event_type, CombatLogEventType::Death);
    assert_eq!(recent[1].event_type, CombatLogEventType::Damage);
    assert_eq!(recent[1].target.as_deref(), Some("Enemy Stronghold"));

    assert_eq!(log.recent(100).len(), log.entries.len());
}

#[test]
fn test_damage_aggregation() {
    let log = recorded_log();

    assert_eq!(log.damage_dealt_by("Warrior #1"), 45.0);
    assert_eq!(log.damage_dealt_by("Mage #2"), 30.0);
    assert_eq!(log.damage_dealt_by("Blue Slime #3"), 20.0);

    let mage = log.damage_by_ability("Mage #2");
    assert_eq!(mage.get("AOE"), Some(&20.0));
    assert_eq!(mage.get("attack"), Some(&10.0));
}

#[test]
fn test_battle_end_and_clear() {
    let mut log = recorded_log();
    log.record(&SimEvent::BattleEnded { outcome: BattleOutcome::Victory });

    let last = log.recent(1)[0];
    assert_eq!(last.event_type, CombatLogEventType::MatchEvent);
    assert!(last.message.contains("Victory"));

    log.clear();
    assert!(log.entries.is_empty());
    assert_eq!(log.match_time, 0.0);
    assert_eq!(log.name_of(WARRIOR), "Unit #1");
}

#[test]
fn test_log_serializes_to_json() {
    let log = recorded_log();
    let json = serde_json::to_string(&log.entries).unwrap();
    assert!(json.contains("\"event_type\":\"Damage\""));
    assert!(json.contains("Blue Slime #3"));
}

// ============================================================================
// Analytics
// ============================================================================

#[test]
fn test_analytics_windows_and_totals() {
    let mut analytics = BattleAnalytics::new(5.0);
    for event in skirmish() {
        analytics.record(&event);
    }

    assert!(!analytics.try_snapshot(4.9));
    assert!(analytics.try_snapshot(5.0));

    let first = &analytics.snapshots()[0];
    assert_eq!(first.total_energy_used, 30.0);
    assert_eq!(first.enemies_defeated, 1);
    assert_eq!(first.heroes_defeated, 0);
    assert_eq!(first.most_spawned_count, 1);
    assert_eq!(first.skill_usage.get("AOE"), Some(&1));

    analytics.record(&SimEvent::EnergySpent { amount: 15.0 });
    assert!(analytics.try_snapshot(10.0));

    let second = &analytics.snapshots()[1];
    assert_eq!(second.total_energy_used, 45.0, "Energy used is cumulative");
    assert_eq!(second.enemies_defeated, 0, "Defeats are counted per window");
    assert_eq!(second.most_spawned_hero, None);
    assert!(second.skill_usage.is_empty());

    let totals = analytics.totals();
    assert_eq!(totals.heroes_deployed, 2);
    assert_eq!(totals.enemies_spawned, 1);
    assert_eq!(totals.enemies_defeated, 1);
    assert_eq!(totals.skills_used, 1);
    assert_eq!(totals.energy_spent, 45.0);
}

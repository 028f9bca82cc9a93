//! Combat logging
//!
//! Records every simulation event as a timestamped, human-readable entry for
//! post-battle analysis. Entries keep the source, target and amount as
//! structured fields so reports can aggregate without parsing messages.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::lane::{BattleOutcome, DamageCause, SimEvent, UnitId};

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in battle time (seconds since battle start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Who caused the event, if anyone
    pub source: Option<String>,
    /// Who was affected, if anyone
    pub target: Option<String>,
    /// Damage, healing or energy involved
    pub amount: Option<f32>,
    /// Attack or skill name for damage entries
    pub ability: Option<String>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CombatLogEventType {
    /// Damage dealt to a unit or stronghold
    Damage,
    /// Healing done
    Healing,
    /// Skill activated
    SkillUsed,
    /// Attack speed buff applied or expired
    Buff,
    /// Hero deployed or enemy spawned
    Spawn,
    /// Unit defeated
    Death,
    /// Projectile launched or expired
    Projectile,
    /// Energy spent or upgraded
    Economy,
    /// Battle event (start, end, etc.)
    MatchEvent,
}

impl CombatLogEventType {
    /// Damage and healing are the only entries that move health
    pub fn changes_health(self) -> bool {
        matches!(self, CombatLogEventType::Damage | CombatLogEventType::Healing)
    }
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug, Clone, Serialize)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current battle time
    pub match_time: f32,
    /// Display names of every unit seen so far
    #[serde(skip)]
    names: HashMap<UnitId, String>,
}

impl CombatLog {
    /// Clear the log for a new battle
    pub fn clear(&mut self) {
        self.entries.clear();
        self.names.clear();
        self.match_time = 0.0;
    }

    /// Remember a display name for a unit
    pub fn register_unit(&mut self, unit: UnitId, name: impl Into<String>) {
        self.names.insert(unit, name.into());
    }

    /// Display name of a unit, falling back to its id
    pub fn name_of(&self, unit: UnitId) -> String {
        self.names
            .get(&unit)
            .cloned()
            .unwrap_or_else(|| format!("Unit {}", unit))
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.log_structured(event_type, message, None, None, None);
    }

    /// Add a new entry with structured fields
    pub fn log_structured(
        &mut self,
        event_type: CombatLogEventType,
        message: String,
        source: Option<String>,
        target: Option<String>,
        amount: Option<f32>,
    ) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            source,
            target,
            amount,
            ability: None,
        });
    }

    /// Add a damage entry attributed to an attack or skill
    pub fn log_damage(
        &mut self,
        source: String,
        target: String,
        ability: String,
        amount: f32,
        message: String,
    ) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type: CombatLogEventType::Damage,
            message,
            source: Some(source),
            target: Some(target),
            amount: Some(amount),
            ability: Some(ability),
        });
    }

    /// Turn a simulation event into a log entry.
    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::HeroSpawned { unit, role } => {
                let name = format!("{} {}", role, unit);
                self.register_unit(*unit, name.clone());
                self.log_structured(
                    CombatLogEventType::Spawn,
                    format!("{} deployed", name),
                    Some(name),
                    None,
                    None,
                );
            }
            SimEvent::EnemySpawned { unit, variant } => {
                let name = format!("{} {}", variant, unit);
                self.register_unit(*unit, name.clone());
                self.log_structured(
                    CombatLogEventType::Spawn,
                    format!("{} entered the lane", name),
                    Some(name),
                    None,
                    None,
                );
            }
            SimEvent::EnergySpent { amount } => {
                self.log_structured(
                    CombatLogEventType::Economy,
                    format!("Spent {:.0} energy", amount),
                    None,
                    None,
                    Some(*amount),
                );
            }
            SimEvent::EnergyUpgraded { clicks, cost, max_energy } => {
                self.log_structured(
                    CombatLogEventType::Economy,
                    format!(
                        "Energy upgrade {} for {:.0}: max energy now {:.0}",
                        clicks, cost, max_energy
                    ),
                    None,
                    None,
                    Some(*cost),
                );
            }
            SimEvent::DamageDealt { source, target, amount, cause } => {
                let source = self.name_of(*source);
                let target = self.name_of(*target);
                let ability = cause_name(cause).to_string();
                let message = format!("{}'s {} hits {} for {:.0} damage", source, ability, target, amount);
                self.log_damage(source, target, ability, *amount, message);
            }
            SimEvent::Healed { source, target, amount } => {
                let source = self.name_of(*source);
                let target = self.name_of(*target);
                self.log_structured(
                    CombatLogEventType::Healing,
                    format!("{} heals {} for {:.0}", source, target, amount),
                    Some(source),
                    Some(target),
                    Some(*amount),
                );
            }
            SimEvent::AttackSpeedBuffed { source, target, cooldown } => {
                let source = self.name_of(*source);
                let target = self.name_of(*target);
                self.log_structured(
                    CombatLogEventType::Buff,
                    format!("{} quickens {} (attack cooldown {:.2}s)", source, target, cooldown),
                    Some(source),
                    Some(target),
                    None,
                );
            }
            SimEvent::BuffExpired { unit, cooldown } => {
                let name = self.name_of(*unit);
                self.log_structured(
                    CombatLogEventType::Buff,
                    format!("{}'s attack speed buff fades (cooldown {:.2}s)", name, cooldown),
                    None,
                    Some(name),
                    None,
                );
            }
            SimEvent::SkillUsed { caster, skill } => {
                let name = self.name_of(*caster);
                self.log_structured(
                    CombatLogEventType::SkillUsed,
                    format!("{} uses {}", name, skill),
                    Some(name),
                    None,
                    None,
                );
            }
            SimEvent::ProjectileLaunched { projectile, source, target } => {
                let source = self.name_of(*source);
                let target = self.name_of(*target);
                self.log_structured(
                    CombatLogEventType::Projectile,
                    format!("{} launches projectile {} at {}", source, projectile.0, target),
                    Some(source),
                    Some(target),
                    None,
                );
            }
            SimEvent::ProjectileExpired { projectile } => {
                self.log(
                    CombatLogEventType::Projectile,
                    format!("Projectile {} fizzled out", projectile.0),
                );
            }
            SimEvent::HeroDefeated { unit, .. } | SimEvent::EnemyDefeated { unit, .. } => {
                let name = self.name_of(*unit);
                self.log_structured(
                    CombatLogEventType::Death,
                    format!("{} has been defeated", name),
                    None,
                    Some(name),
                    None,
                );
            }
            // Removal is a presentation detail, not combat
            SimEvent::UnitRemoved { .. } => {}
            SimEvent::StrongholdDamaged { side, source, amount, remaining, cause } => {
                let source = self.name_of(*source);
                let target = format!("{} Stronghold", side.name());
                let ability = cause_name(cause).to_string();
                let message = format!(
                    "{}'s {} hits the {} for {:.0} ({:.0} left)",
                    source, ability, target, amount, remaining
                );
                self.log_damage(source, target, ability, *amount, message);
            }
            SimEvent::BattleEnded { outcome } => {
                let message = match outcome {
                    BattleOutcome::Victory => "Victory! The enemy stronghold has fallen",
                    BattleOutcome::Defeat => "Defeat! The player stronghold has fallen",
                };
                self.log(CombatLogEventType::MatchEvent, message.to_string());
            }
        }
    }

    fn entries_where(&self, keep: impl Fn(&CombatLogEntry) -> bool) -> Vec<&CombatLogEntry> {
        self.entries.iter().filter(|entry| keep(entry)).collect()
    }

    /// Entries of one event type, oldest first
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries_where(|entry| entry.event_type == event_type)
    }

    /// Damage and healing entries that actually moved someone's health
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.entries_where(|entry| {
            entry.event_type.changes_health() && entry.amount.is_some_and(|amount| amount > 0.0)
        })
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        let start = self.entries.len().saturating_sub(count);
        self.entries[start..].iter().collect()
    }

    /// Total damage dealt by the named source
    pub fn damage_dealt_by(&self, source: &str) -> f32 {
        self.filter_by_type(CombatLogEventType::Damage)
            .into_iter()
            .filter(|e| e.source.as_deref() == Some(source))
            .filter_map(|e| e.amount)
            .sum()
    }

    /// Damage dealt by the named source, grouped by attack or skill
    pub fn damage_by_ability(&self, source: &str) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for entry in self.filter_by_type(CombatLogEventType::Damage) {
            if entry.source.as_deref() != Some(source) {
                continue;
            }
            if let (Some(ability), Some(amount)) = (&entry.ability, entry.amount) {
                *totals.entry(ability.clone()).or_insert(0.0) += amount;
            }
        }
        totals
    }

    /// Number of entries per event type
    pub fn count_by_type(&self) -> HashMap<CombatLogEventType, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.event_type).or_insert(0) += 1;
        }
        counts
    }
}

fn cause_name(cause: &DamageCause) -> &str {
    match cause {
        DamageCause::Attack => "attack",
        DamageCause::Skill(name) => name.as_str(),
        DamageCause::Breach => "breach",
    }
}

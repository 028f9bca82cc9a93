//! Battle analytics
//!
//! Tallies telemetry from simulation events and closes a snapshot row every
//! few seconds of battle time. Defeats, spawns and skill uses are counted per
//! window and reset at each snapshot; energy spent is cumulative.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::lane::{HeroRole, SimEvent, Timestamp};

/// Default seconds between snapshots
pub const SNAPSHOT_INTERVAL: f32 = 5.0;

/// One closed analytics window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSnapshot {
    /// Battle time at which the window closed
    pub timestamp: f32,
    /// Energy spent since the battle started
    pub total_energy_used: f32,
    pub enemies_defeated: u32,
    pub heroes_defeated: u32,
    /// Role deployed most often in the window, if any
    pub most_spawned_hero: Option<HeroRole>,
    pub most_spawned_count: u32,
    /// Activations per skill name in the window
    pub skill_usage: BTreeMap<String, u32>,
}

/// Whole-battle counters, never reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BattleTotals {
    pub heroes_deployed: u32,
    pub enemies_spawned: u32,
    pub enemies_defeated: u32,
    pub heroes_defeated: u32,
    pub skills_used: u32,
    pub energy_spent: f32,
    pub energy_upgrades: u32,
}

#[derive(Resource, Debug, Clone)]
pub struct BattleAnalytics {
    /// Seconds between snapshots
    pub interval: f32,
    last_snapshot_time: Timestamp,
    energy_spent: f32,
    enemies_defeated: u32,
    heroes_defeated: u32,
    hero_spawns: BTreeMap<HeroRole, u32>,
    skill_usage: BTreeMap<String, u32>,
    totals: BattleTotals,
    snapshots: Vec<AnalyticsSnapshot>,
}

impl Default for BattleAnalytics {
    fn default() -> Self {
        Self::new(SNAPSHOT_INTERVAL)
    }
}

impl BattleAnalytics {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_snapshot_time: 0.0,
            energy_spent: 0.0,
            enemies_defeated: 0,
            heroes_defeated: 0,
            hero_spawns: BTreeMap::new(),
            skill_usage: BTreeMap::new(),
            totals: BattleTotals::default(),
            snapshots: Vec::new(),
        }
    }

    pub fn record(&mut self, event: &SimEvent) {
        match event {
            SimEvent::HeroSpawned { role, .. } => {
                *self.hero_spawns.entry(*role).or_insert(0) += 1;
                self.totals.heroes_deployed += 1;
            }
            SimEvent::EnemySpawned { .. } => self.totals.enemies_spawned += 1,
            SimEvent::EnergySpent { amount } => {
                self.energy_spent += amount;
                self.totals.energy_spent += amount;
            }
            SimEvent::EnergyUpgraded { .. } => self.totals.energy_upgrades += 1,
            SimEvent::SkillUsed { skill, .. } => {
                *self.skill_usage.entry(skill.clone()).or_insert(0) += 1;
                self.totals.skills_used += 1;
            }
            SimEvent::EnemyDefeated { .. } => {
                self.enemies_defeated += 1;
                self.totals.enemies_defeated += 1;
            }
            SimEvent::HeroDefeated { .. } => {
                self.heroes_defeated += 1;
                self.totals.heroes_defeated += 1;
            }
            _ => {}
        }
    }

    /// Close the current window if `interval` seconds have passed.
    ///
    /// Returns true when a snapshot was taken.
    pub fn try_snapshot(&mut self, now: Timestamp) -> bool {
        if now - self.last_snapshot_time < self.interval {
            return false;
        }
        // Ties go to the role listed first
        let (most_spawned_hero, most_spawned_count) = self
            .hero_spawns
            .iter()
            .fold((None, 0), |best, (role, count)| {
                if *count > best.1 {
                    (Some(*role), *count)
                } else {
                    best
                }
            });

        self.snapshots.push(AnalyticsSnapshot {
            timestamp: now,
            total_energy_used: self.energy_spent,
            enemies_defeated: self.enemies_defeated,
            heroes_defeated: self.heroes_defeated,
            most_spawned_hero,
            most_spawned_count,
            skill_usage: std::mem::take(&mut self.skill_usage),
        });
        self.enemies_defeated = 0;
        self.heroes_defeated = 0;
        self.hero_spawns.clear();
        self.last_snapshot_time = now;
        true
    }

    pub fn snapshots(&self) -> &[AnalyticsSnapshot] {
        &self.snapshots
    }

    pub fn totals(&self) -> &BattleTotals {
        &self.totals
    }
}

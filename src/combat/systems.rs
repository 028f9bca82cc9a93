//! Combat reporting systems
//!
//! ECS systems that consume `SimEvent`s forwarded by the simulation.

use bevy::prelude::*;

use super::analytics::BattleAnalytics;
use super::log::CombatLog;
use crate::lane::SimEvent;

/// Append every simulation event to the combat log
pub fn record_combat_log(
    time: Res<Time>,
    mut events: EventReader<SimEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    combat_log.match_time = time.elapsed_secs();
    for event in events.read() {
        combat_log.record(event);
    }
}

/// Feed analytics counters and close snapshot windows
pub fn track_analytics(
    time: Res<Time>,
    mut events: EventReader<SimEvent>,
    mut analytics: ResMut<BattleAnalytics>,
) {
    for event in events.read() {
        analytics.record(event);
    }
    if analytics.try_snapshot(time.elapsed_secs()) {
        debug!("Analytics snapshot closed at {:.1}s", time.elapsed_secs());
    }
}

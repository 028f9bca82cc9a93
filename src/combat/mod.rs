//! Combat reporting
//!
//! Bevy-side consumers of the lane simulation's events:
//! - Combat logging
//! - Battle analytics snapshots
//!
//! Systems are grouped into ordered phases so commands are issued before the
//! simulation ticks and reports only ever see the current tick's events.

use bevy::prelude::*;

pub mod analytics;
pub mod log;
pub mod systems;

use crate::lane::SimEvent;
use systems::*;

/// Frame phases, run in this order every update.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleSystemPhase {
    /// Deployments and upgrades for this tick
    Commands,
    /// `advance_tick` and event forwarding
    Simulation,
    /// Logging, analytics and end-of-battle checks
    Reporting,
}

/// Plugin for the combat reporting layer
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                BattleSystemPhase::Commands,
                BattleSystemPhase::Simulation,
                BattleSystemPhase::Reporting,
            )
                .chain(),
        )
        .add_event::<SimEvent>()
        .init_resource::<log::CombatLog>()
        .init_resource::<analytics::BattleAnalytics>()
        .add_systems(
            Update,
            (record_combat_log, track_analytics)
                .chain()
                .in_set(BattleSystemPhase::Reporting),
        );
    }
}

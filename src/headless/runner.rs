//! Headless battle execution
//!
//! Runs lane battles without any graphical output, suitable for automated
//! testing. Time advances by a fixed step per update instead of following
//! the wall clock, so a battle runs as fast as the CPU allows and a seeded
//! battle always plays out the same way.

use bevy::prelude::*;
use bevy::time::{TimeUpdateStrategy, Virtual};
use serde::Serialize;
use std::time::Duration;

use crate::combat::analytics::{AnalyticsSnapshot, BattleAnalytics, BattleTotals};
use crate::combat::log::{CombatLog, CombatLogEntry, CombatLogEventType};
use crate::combat::{BattleSystemPhase, CombatPlugin};
use crate::lane::{
    load_lane_config, BattleOutcome, GameRng, HeroRole, LaneConfig, SimEvent, Simulation,
};

use super::config::HeadlessBattleConfig;

/// Result of a completed headless battle
///
/// This struct provides programmatic access to battle results for testing and analysis.
#[derive(Debug, Clone, Serialize)]
pub struct BattleResult {
    /// Victory or defeat, or None for a draw by timeout
    pub outcome: Option<BattleOutcome>,
    /// Battle time in seconds when the battle ended
    pub battle_time: f32,
    /// Simulation ticks run
    pub ticks: u64,
    pub player_stronghold_health: f32,
    pub enemy_stronghold_health: f32,
    /// Energy left in the pool at the end
    pub final_energy: f32,
    pub heroes_alive: usize,
    pub enemies_alive: usize,
    /// Whole-battle counters
    pub totals: BattleTotals,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
    /// Analytics windows closed during the battle
    pub snapshots: Vec<AnalyticsSnapshot>,
}

/// The simulation driven by the headless app
#[derive(Resource)]
pub struct LaneBattle {
    pub simulation: Simulation,
}

/// Resource to track headless battle state
#[derive(Resource)]
pub struct HeadlessBattleState {
    /// Maximum battle duration before declaring a draw
    pub max_duration: f32,
    /// Elapsed battle time
    pub elapsed_time: f32,
    /// Custom output path for the battle report
    pub output_path: Option<String>,
    /// Upgrade the economy whenever energy is full
    pub auto_upgrade: bool,
    /// Roles to deploy, in order
    pub deploy_plan: Vec<HeroRole>,
    /// Index of the next role in `deploy_plan`
    pub next_deploy: usize,
    /// Whether the battle has completed
    pub battle_complete: bool,
    /// Battle result (populated when the battle completes)
    pub result: Option<BattleResult>,
}

/// Plugin for headless battle execution
pub struct HeadlessPlugin;

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CombatPlugin)
            .add_systems(Startup, headless_setup_battle)
            .add_systems(
                Update,
                (headless_deploy_heroes, headless_auto_upgrade)
                    .chain()
                    .in_set(BattleSystemPhase::Commands),
            )
            .add_systems(Update, advance_battle.in_set(BattleSystemPhase::Simulation))
            .add_systems(
                Update,
                headless_check_battle_end
                    .in_set(BattleSystemPhase::Reporting)
                    .after(crate::combat::systems::track_analytics),
            )
            .add_systems(PostUpdate, headless_exit_on_complete);
    }
}

/// Setup system for headless battle
fn headless_setup_battle(battle: Res<LaneBattle>, mut combat_log: ResMut<CombatLog>) {
    combat_log.clear();
    combat_log.log(
        CombatLogEventType::MatchEvent,
        "Battle started (headless mode)!".to_string(),
    );

    match battle.simulation.seed() {
        Some(seed) => info!("Using deterministic RNG with seed: {}", seed),
        None => info!("Using non-deterministic RNG (no seed provided)"),
    }
}

/// Deploy the next hero in the plan as soon as it is affordable and off cooldown
fn headless_deploy_heroes(
    time: Res<Time>,
    mut battle: ResMut<LaneBattle>,
    mut state: ResMut<HeadlessBattleState>,
) {
    if state.battle_complete || state.deploy_plan.is_empty() {
        return;
    }
    let role = state.deploy_plan[state.next_deploy];
    if battle.simulation.spawn_hero(role, time.elapsed_secs()).is_some() {
        state.next_deploy = (state.next_deploy + 1) % state.deploy_plan.len();
    }
}

/// Spend a full energy pool on an upgrade
fn headless_auto_upgrade(mut battle: ResMut<LaneBattle>, state: Res<HeadlessBattleState>) {
    if state.battle_complete || !state.auto_upgrade {
        return;
    }
    let economy = battle.simulation.economy();
    if economy.energy() >= economy.max_energy() && economy.can_upgrade() {
        battle.simulation.upgrade_economy();
    }
}

/// Run one simulation tick and forward its events to the reporting systems
fn advance_battle(
    time: Res<Time>,
    mut battle: ResMut<LaneBattle>,
    mut state: ResMut<HeadlessBattleState>,
    mut events: EventWriter<SimEvent>,
) {
    if state.battle_complete {
        return;
    }
    let now = time.elapsed_secs();
    let tick_events = battle.simulation.advance_tick(now);
    state.elapsed_time = now;
    events.send_batch(tick_events);
}

/// Check if the battle has ended (a stronghold fell, or timeout)
fn headless_check_battle_end(
    battle: Res<LaneBattle>,
    analytics: Res<BattleAnalytics>,
    combat_log: Res<CombatLog>,
    mut state: ResMut<HeadlessBattleState>,
) {
    if state.battle_complete {
        return;
    }

    let outcome = battle.simulation.outcome();
    match outcome {
        Some(BattleOutcome::Victory) => info!("Battle ended! The enemy stronghold has fallen"),
        Some(BattleOutcome::Defeat) => info!("Battle ended! The player stronghold has fallen"),
        None if state.elapsed_time >= state.max_duration => info!(
            "Battle timed out after {:.1}s - declaring DRAW",
            state.elapsed_time
        ),
        None => return,
    }

    let result = build_battle_result(&battle.simulation, &state, &analytics);
    if let Some(path) = state.output_path.as_deref() {
        save_battle_report(path, &result, &combat_log.entries);
    }
    state.result = Some(result);
    state.battle_complete = true;
}

/// Build the BattleResult from the current simulation state
fn build_battle_result(
    simulation: &Simulation,
    state: &HeadlessBattleState,
    analytics: &BattleAnalytics,
) -> BattleResult {
    let (player_stronghold_health, enemy_stronghold_health) = simulation.stronghold_health();
    BattleResult {
        outcome: simulation.outcome(),
        battle_time: state.elapsed_time,
        ticks: simulation.tick_count(),
        player_stronghold_health,
        enemy_stronghold_health,
        final_energy: simulation.economy().energy(),
        heroes_alive: simulation.heroes().len(),
        enemies_alive: simulation.enemies().len(),
        totals: analytics.totals().clone(),
        random_seed: simulation.seed(),
        snapshots: analytics.snapshots().to_vec(),
    }
}

#[derive(Serialize)]
struct BattleReport<'a> {
    result: &'a BattleResult,
    combat_log: &'a [CombatLogEntry],
}

/// Save the result and combat log as JSON
fn save_battle_report(path: &str, result: &BattleResult, combat_log: &[CombatLogEntry]) {
    let report = BattleReport { result, combat_log };
    let written = serde_json::to_string_pretty(&report)
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
    match written {
        Ok(()) => println!("Battle complete. Report saved to: {}", path),
        Err(e) => eprintln!("Failed to save battle report: {}", e),
    }
}

/// Exit the app when the battle is complete
fn headless_exit_on_complete(state: Res<HeadlessBattleState>, mut exit: EventWriter<AppExit>) {
    if state.battle_complete {
        exit.send(AppExit::Success);
    }
}

/// Build the headless app for a battle without running it
pub fn build_headless_app(config: &HeadlessBattleConfig) -> Result<App, String> {
    config.validate()?;

    let lane_config = match &config.lane_config_path {
        Some(path) => load_lane_config(path).map_err(|e| e.to_string())?,
        None => LaneConfig::default(),
    };
    let rng = match config.random_seed {
        Some(seed) => GameRng::from_seed(seed),
        None => GameRng::from_entropy(),
    };
    let mut simulation = Simulation::new(lane_config, rng)
        .map_err(|e| format!("Invalid lane configuration: {}", e))?;
    simulation.set_enemy_waves(config.enemy_waves);

    let step = Duration::from_secs_f32(config.tick_duration());
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(LaneBattle { simulation })
        .insert_resource(HeadlessBattleState {
            max_duration: config.max_duration_secs,
            elapsed_time: 0.0,
            output_path: config.output_path.clone(),
            auto_upgrade: config.auto_upgrade,
            deploy_plan: config.deploy_roles()?,
            next_deploy: 0,
            battle_complete: false,
            result: None,
        })
        .add_plugins(HeadlessPlugin);
    // Never clamp a tick, whatever the tick rate
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .set_max_delta(step);

    Ok(app)
}

/// Update a built app until its battle completes and return the result
pub fn run_to_completion(mut app: App) -> Result<BattleResult, String> {
    app.finish();
    app.cleanup();

    while app.should_exit().is_none() {
        app.update();
    }

    app.world_mut()
        .resource_mut::<HeadlessBattleState>()
        .result
        .take()
        .ok_or_else(|| "Battle exited without a result".to_string())
}

/// Run a headless battle with the given configuration
pub fn run_headless_battle(config: HeadlessBattleConfig) -> Result<BattleResult, String> {
    println!("Starting headless battle simulation...");
    println!("  Deploy plan: {:?}", config.deploy_plan);
    println!("  Enemy waves: {}", config.enemy_waves);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let app = build_headless_app(&config)?;
    run_to_completion(app)
}

//! LaneSim - Lane Combat Simulator
//!
//! Runs a headless lane battle: heroes are deployed from a plan while enemy
//! waves march on the player's stronghold, until one stronghold falls or the
//! time limit is reached.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use lanesim::cli;
use lanesim::headless::{build_headless_app, run_to_completion, HeadlessBattleConfig};
use lanesim::lane::BattleOutcome;

fn main() {
    let args = cli::parse_args();

    let mut config = match &args.config {
        Some(path) => match HeadlessBattleConfig::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => HeadlessBattleConfig::default(),
    };
    args.apply_overrides(&mut config);

    let level = args.log_level.parse::<Level>().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", args.log_level);
        Level::INFO
    });

    println!("Starting headless battle simulation...");
    println!("  Deploy plan: {:?}", config.deploy_plan);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let mut app = match build_headless_app(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    app.add_plugins(LogPlugin {
        level,
        ..default()
    });

    let result = match run_to_completion(app) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let verdict = match result.outcome {
        Some(BattleOutcome::Victory) => "VICTORY",
        Some(BattleOutcome::Defeat) => "DEFEAT",
        None => "DRAW (time limit)",
    };
    println!("Result: {}", verdict);
    println!(
        "  Time: {:.1}s over {} ticks",
        result.battle_time, result.ticks
    );
    println!(
        "  Strongholds: player {:.0} / enemy {:.0}",
        result.player_stronghold_health, result.enemy_stronghold_health
    );
    println!(
        "  Heroes deployed: {}, defeated: {}",
        result.totals.heroes_deployed, result.totals.heroes_defeated
    );
    println!(
        "  Enemies spawned: {}, defeated: {}",
        result.totals.enemies_spawned, result.totals.enemies_defeated
    );
    println!(
        "  Energy spent: {:.0} ({} upgrades)",
        result.totals.energy_spent, result.totals.energy_upgrades
    );
    if let Some(seed) = result.random_seed {
        println!("  Seed: {}", seed);
    }
}

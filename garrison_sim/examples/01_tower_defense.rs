// garrison_sim/examples/01_tower_defense.rs

//! An end-to-end run of the Garrison unit production pipeline.
//!
//! This example demonstrates how to:
//! 1. Parse the command line to pick a scenario.
//! 2. Set up the Bevy application (windowed or headless) and avian3d physics.
//! 3. Add the `GarrisonSimulationPlugin` and, when windowed, the button panel.
//! 4. Drive the selected tower from the keyboard (`P` produce, `U` upgrade).
//!
//! To run this example:
//! `cargo run --example 01_tower_defense -- --scenario assets/scenarios/crossroads.toml`
//! Headless, producing once on startup:
//! `cargo run --example 01_tower_defense -- --headless --auto-produce`
//! Without the engine, straight from the scenario file:
//! `cargo run --example 01_tower_defense -- --dry-run`

use std::process::ExitCode;
use std::time::Duration;

// --- Bevy Imports ---
use avian3d::prelude::*;
use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin};
use clap::Parser;

// --- Project-Specific Imports ---
use garrison_core::production::produce_units;
use garrison_sim::cli::Cli;
use garrison_sim::simulation::config::ScenarioConfig;
use garrison_sim::simulation::core::transforms::bevy_vec3_to_position;
use garrison_sim::prelude::{ProduceUnitsRequested, UpgradeTowerRequested};
use garrison_sim::simulation::plugins::ui::{ProductionUiPlugin, SelectedTower};
use garrison_sim::GarrisonSimulationPlugin;

const LOG_FILTER: &str = "info,wgpu_core=error,wgpu_hal=error,garrison_sim=debug,garrison_core=debug";

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.dry_run {
        return dry_run(&cli);
    }
    let headless = cli.headless;

    let mut app = App::new();

    // --- 1. Core Bevy Plugins ---
    if headless {
        app.add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
            LogPlugin {
                level: bevy::log::Level::INFO,
                filter: LOG_FILTER.to_string(),
                ..default()
            },
            StatesPlugin,
            TransformPlugin,
            AssetPlugin::default(),
            bevy::render::mesh::MeshPlugin,
            bevy::scene::ScenePlugin,
        ));
    } else {
        app.add_plugins(DefaultPlugins.set(LogPlugin {
            level: bevy::log::Level::INFO,
            filter: LOG_FILTER.to_string(),
            ..default()
        }));
    }

    // --- 2. Physics & Configuration ---
    app.add_plugins(PhysicsPlugins::default())
        // Insert the parsed CLI so the config plugin knows which scenario to load.
        .insert_resource(cli);

    // --- 3. The Garrison Simulation ---
    app.add_plugins(GarrisonSimulationPlugin);

    if !headless {
        app.add_plugins(ProductionUiPlugin)
            // Visualize colliders, including the freshly produced units.
            .add_plugins(PhysicsDebugPlugin::default())
            .add_systems(Update, keyboard_controller);
    }

    // --- 4. Run the App ---
    info!("Starting Garrison...");
    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(_) => ExitCode::FAILURE,
    }
}

/// Runs every tower's production once against the scenario's static geometry.
fn dry_run(cli: &Cli) -> ExitCode {
    let config = match ScenarioConfig::load(&cli.scenario) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let scene = config.static_scene();
    let params = config.production_params();

    for tower in &config.towers {
        let origin = bevy_vec3_to_position(tower.translation());
        match produce_units(&scene, &origin, &params, |_| {}) {
            Ok(report) => {
                println!("[{}] {} unit(s):", tower.name, report.placements.len());
                for placement in &report.placements {
                    let p = placement.position;
                    println!(
                        "  slot {} at ({:.2}, {:.2}, {:.2}) after {} candidate(s)",
                        placement.slot, p.x, p.y, p.z, placement.candidates_tried
                    );
                }
                if let Some(halt) = &report.halted {
                    println!("  stopped: {}", halt);
                }
            }
            Err(e) => println!("[{}] {}", tower.name, e),
        }
    }
    ExitCode::SUCCESS
}

/// Mirrors the panel buttons on the keyboard for the selected tower.
fn keyboard_controller(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    selected: Res<SelectedTower>,
    mut produce: EventWriter<ProduceUnitsRequested>,
    mut upgrade: EventWriter<UpgradeTowerRequested>,
) {
    let Some(tower) = selected.0 else {
        return;
    };
    if keyboard_input.just_pressed(KeyCode::KeyP) {
        produce.write(ProduceUnitsRequested { tower });
    }
    if keyboard_input.just_pressed(KeyCode::KeyU) {
        upgrade.write(UpgradeTowerRequested { tower });
    }
}

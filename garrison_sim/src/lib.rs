// garrison_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::config::ConfigPlugin;
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::production::ProductionPlugin;
use crate::simulation::plugins::world::WorldSpawnerPlugin;

// This prelude is for convenience for other files WITHIN the garrison_sim crate.
pub mod prelude;

pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
///
/// It expects avian3d's `PhysicsPlugins` to be added by the application.
/// The button panel (`simulation::plugins::ui::ProductionUiPlugin`) is
/// separate because it needs Bevy's UI and rendering plugins.
pub struct GarrisonSimulationPlugin;

impl Plugin for GarrisonSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // States, events and set ordering.
            SimulationSetupPlugin,
            // Reads the scenario file.
            ConfigPlugin,
            // Spawns roads, obstacles, towers, lighting and camera.
            WorldSpawnerPlugin,
            // Answers produce and upgrade requests.
            ProductionPlugin,
        ));
    }
}

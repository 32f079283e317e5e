// garrison_sim/src/simulation/plugins/production/mod.rs

//! Answers tower requests.
//!
//! `ProduceUnitsRequested` runs the core production search against the live
//! avian3d scene and spawns a unit for every placement. `UpgradeTowerRequested`
//! only logs for now. With `--auto-produce`, every tower gets one request
//! shortly after the scene is up.

mod physics_adapter;
mod systems;

pub use physics_adapter::AvianPhysicsWorld;
pub use systems::{
    arm_auto_produce, auto_produce_system, produce_units_system, spawn_unit, upgrade_tower_system,
    AutoProduce,
};

use crate::prelude::*;

pub struct ProductionPlugin;

impl Plugin for ProductionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Running), arm_auto_produce)
            .add_systems(
                Update,
                (
                    auto_produce_system.in_set(ProductionSet::Input),
                    (produce_units_system, upgrade_tower_system).in_set(ProductionSet::Execute),
                ),
            );
    }
}

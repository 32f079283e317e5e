// garrison_sim/src/simulation/plugins/world/mod.rs

//! Builds the scene described by the scenario: roads, enemies, towers, and
//! (when a renderer is present) lighting, a camera and simple meshes.

mod spawner;

use crate::prelude::*;

pub use spawner::UnitAssets;

pub struct WorldSpawnerPlugin;

impl Plugin for WorldSpawnerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (
                spawner::spawn_scenario_shells.in_set(SceneBuildSet::CreateRequests),
                (
                    spawner::attach_road_physics,
                    spawner::attach_obstacle_physics,
                    spawner::attach_tower_physics,
                )
                    .in_set(SceneBuildSet::Physics),
                (
                    spawner::attach_visuals,
                    spawner::prepare_unit_assets,
                    spawner::spawn_lighting_and_camera,
                )
                    .in_set(SceneBuildSet::Visuals),
                spawner::cleanup_spawn_requests.in_set(SceneBuildSet::Cleanup),
            ),
        );
    }
}

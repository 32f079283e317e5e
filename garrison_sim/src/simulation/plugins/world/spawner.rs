// garrison_sim/src/simulation/plugins/world/spawner.rs

use avian3d::prelude::{Collider, RigidBody};

use crate::cli::Cli;
use crate::prelude::*;
use crate::simulation::core::collision_layers::{road_layers, structure_layers, unit_layers};
use crate::simulation::core::spawn_requests::{
    SpawnObstacleRequest, SpawnRoadRequest, SpawnTowerRequest,
};

const TOWER_FOOTPRINT: f32 = 1.5;
const TOWER_HEIGHT: f32 = 3.0;

/// Mesh and material shared by every produced unit. Only present when the
/// app renders.
#[derive(Resource, Clone)]
pub struct UnitAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

// =========================================================================
// == Pass 1: Request Shells ==
// =========================================================================

pub(super) fn spawn_scenario_shells(mut commands: Commands, config: Res<ScenarioConfig>) {
    for road in &config.roads {
        info!("[SPAWN] Posting spawn request for road: {}", road.name);
        commands.spawn((
            Name::new(road.name.clone()),
            Road,
            Transform::from_translation(road.translation()),
            SpawnRoadRequest(road.clone()),
        ));
    }

    for obstacle in &config.obstacles {
        info!("[SPAWN] Posting spawn request for obstacle: {}", obstacle.name);
        commands.spawn((
            Name::new(obstacle.name.clone()),
            Obstacle,
            Transform::from_translation(obstacle.translation()),
            SpawnObstacleRequest(obstacle.clone()),
        ));
    }

    for tower in &config.towers {
        info!("[SPAWN] Posting spawn request for tower: {}", tower.name);
        commands.spawn((
            Name::new(tower.name.clone()),
            Tower,
            Transform::from_translation(tower.translation()),
            SpawnTowerRequest(tower.clone()),
        ));
    }

    if config.towers.is_empty() {
        warn!("Scenario has no towers. Nothing will be able to produce units.");
    }
}

// =========================================================================
// == Pass 2: Physics ==
// =========================================================================

pub(super) fn attach_road_physics(
    mut commands: Commands,
    query: Query<(Entity, &SpawnRoadRequest)>,
) {
    for (entity, request) in &query {
        let size = request.0.extents();
        commands.entity(entity).insert((
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            road_layers(),
        ));
    }
}

pub(super) fn attach_obstacle_physics(
    mut commands: Commands,
    query: Query<(Entity, &SpawnObstacleRequest)>,
) {
    for (entity, request) in &query {
        commands.entity(entity).insert((
            RigidBody::Kinematic,
            Collider::sphere(request.0.radius),
            unit_layers(),
        ));
    }
}

pub(super) fn attach_tower_physics(
    mut commands: Commands,
    query: Query<Entity, With<SpawnTowerRequest>>,
) {
    for entity in &query {
        commands.entity(entity).insert((
            RigidBody::Static,
            Collider::cuboid(TOWER_FOOTPRINT, TOWER_HEIGHT, TOWER_FOOTPRINT),
            structure_layers(),
        ));
    }
}

// =========================================================================
// == Pass 3: Visuals ==
// =========================================================================

/// Gives every scenario entity a simple mesh. Does nothing when headless.
pub(super) fn attach_visuals(
    mut commands: Commands,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
    roads: Query<(Entity, &SpawnRoadRequest)>,
    obstacles: Query<(Entity, &SpawnObstacleRequest)>,
    towers: Query<Entity, With<SpawnTowerRequest>>,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        debug!("No mesh or material assets available; skipping scene visuals.");
        return;
    };

    let road_material = materials.add(Color::srgb(0.3, 0.3, 0.32));
    let obstacle_material = materials.add(Color::srgb(0.8, 0.15, 0.15));
    let tower_material = materials.add(Color::srgb(0.55, 0.5, 0.4));

    for (entity, request) in &roads {
        let size = request.0.extents();
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(road_material.clone()),
        ));
    }

    for (entity, request) in &obstacles {
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Sphere::new(request.0.radius))),
            MeshMaterial3d(obstacle_material.clone()),
        ));
    }

    let tower_mesh = meshes.add(Cuboid::new(TOWER_FOOTPRINT, TOWER_HEIGHT, TOWER_FOOTPRINT));
    for entity in &towers {
        commands.entity(entity).insert((
            Mesh3d(tower_mesh.clone()),
            MeshMaterial3d(tower_material.clone()),
        ));
    }
}

pub(super) fn prepare_unit_assets(
    mut commands: Commands,
    settings: Res<ProductionSettings>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let (Some(mut meshes), Some(mut materials)) = (meshes, materials) else {
        return;
    };
    let width = settings.unit.radius * 2.0;
    commands.insert_resource(UnitAssets {
        mesh: meshes.add(Cuboid::new(width, settings.unit.height, width)),
        material: materials.add(Color::srgb(0.2, 0.45, 0.85)),
    });
}

pub(super) fn spawn_lighting_and_camera(mut commands: Commands, cli: Res<Cli>) {
    if cli.headless {
        return;
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 15_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // A static camera looking down at the play area.
    let camera_transform = Transform::from_xyz(-12.0, 18.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y);
    commands.spawn((Camera3d::default(), camera_transform));
}

// =========================================================================
// == Pass 4: Cleanup ==
// =========================================================================

pub(super) fn cleanup_spawn_requests(
    mut commands: Commands,
    query: Query<
        Entity,
        Or<(
            With<SpawnRoadRequest>,
            With<SpawnObstacleRequest>,
            With<SpawnTowerRequest>,
        )>,
    >,
) {
    info!("[CLEANUP] Removing spawn request components.");
    for entity in &query {
        commands
            .entity(entity)
            .remove::<(SpawnRoadRequest, SpawnObstacleRequest, SpawnTowerRequest)>();
    }
}

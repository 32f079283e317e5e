// garrison_sim/src/simulation/plugins/production/systems.rs

use avian3d::prelude::{Collider, RigidBody};
use garrison_core::physics::WithPendingUnits;
use garrison_core::production::{produce_units, Placement, ProductionError, ProductionReport};

use super::physics_adapter::AvianPhysicsWorld;
use crate::cli::Cli;
use crate::prelude::*;
use crate::simulation::config::UnitConfig;
use crate::simulation::core::collision_layers::unit_layers;
use crate::simulation::core::transforms::{
    bevy_vec3_to_position, global_transform_to_position, position_to_bevy_transform,
};
use crate::simulation::plugins::world::UnitAssets;

/// Delay before an automatic request. The physics pipeline needs a few
/// steps to pick up the freshly spawned road colliders.
const AUTO_PRODUCE_DELAY_SECS: f32 = 0.5;

/// Present when every tower should produce once without player input.
#[derive(Resource)]
pub struct AutoProduce(pub Timer);

pub fn arm_auto_produce(mut commands: Commands, cli: Res<Cli>) {
    if cli.auto_produce {
        info!(
            "Auto-produce armed: every tower will produce in {:.1}s.",
            AUTO_PRODUCE_DELAY_SECS
        );
        commands.insert_resource(AutoProduce(Timer::from_seconds(
            AUTO_PRODUCE_DELAY_SECS,
            TimerMode::Once,
        )));
    }
}

pub fn auto_produce_system(
    mut commands: Commands,
    time: Res<Time>,
    auto: Option<ResMut<AutoProduce>>,
    towers: Query<Entity, With<Tower>>,
    mut produce: EventWriter<ProduceUnitsRequested>,
) {
    let Some(mut auto) = auto else {
        return;
    };
    if !auto.0.tick(time.delta()).just_finished() {
        return;
    }
    for tower in &towers {
        produce.write(ProduceUnitsRequested { tower });
    }
    commands.remove_resource::<AutoProduce>();
}

/// Handles every `ProduceUnitsRequested` sent this frame.
///
/// Units spawned here only reach avian's spatial query pipeline after the
/// commands apply and the next physics step runs. Until then every produced
/// unit, earlier ones included, is checked as a pending sphere so a later run
/// never places a unit on top of it.
pub fn produce_units_system(
    mut commands: Commands,
    mut requests: EventReader<ProduceUnitsRequested>,
    mut finished: EventWriter<ProductionFinished>,
    physics: AvianPhysicsWorld,
    settings: Res<ProductionSettings>,
    towers: Query<(&GlobalTransform, &Name), With<Tower>>,
    produced: Query<(Entity, &Transform), With<ProducedUnit>>,
    unit_assets: Option<Res<UnitAssets>>,
) {
    if requests.is_empty() {
        return;
    }

    let mut pending: Vec<ColliderHit> = produced
        .iter()
        .map(|(entity, transform)| ColliderHit {
            handle: ColliderHandle::from_entity(entity),
            position: bevy_vec3_to_position(transform.translation),
        })
        .collect();
    let unit_radius = settings.unit.radius as f64;

    for request in requests.read() {
        let Ok((tower_transform, tower_name)) = towers.get(request.tower) else {
            warn!(
                "Produce request for {:?}, which is not a tower. Ignoring.",
                request.tower
            );
            continue;
        };

        let origin = global_transform_to_position(tower_transform);
        let world = WithPendingUnits::new(&physics, &pending, unit_radius);
        let mut placed = Vec::new();
        let result = produce_units(&world, &origin, &settings.params, |placement| {
            let unit = spawn_unit(
                &mut commands,
                request.tower,
                placement,
                &settings.unit,
                unit_assets.as_deref(),
            );
            placed.push(ColliderHit {
                handle: ColliderHandle::from_entity(unit),
                position: placement.position,
            });
        });
        pending.extend(placed);

        log_production(tower_name, &result);

        finished.write(ProductionFinished {
            tower: request.tower,
            result,
        });
    }
}

/// Spawns one produced unit at `placement` with identity rotation.
pub fn spawn_unit(
    commands: &mut Commands,
    producer: Entity,
    placement: &Placement,
    unit: &UnitConfig,
    assets: Option<&UnitAssets>,
) -> Entity {
    let width = unit.radius * 2.0;
    let mut entity = commands.spawn((
        Name::new(format!("Unit {}", placement.slot)),
        ProducedUnit {
            producer,
            slot: placement.slot,
        },
        position_to_bevy_transform(&placement.position),
        RigidBody::Kinematic,
        Collider::cuboid(width, unit.height, width),
        unit_layers(),
    ));

    if let Some(assets) = assets {
        entity.insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }

    entity.id()
}

fn log_production(tower_name: &Name, result: &Result<ProductionReport, ProductionError>) {
    let report = match result {
        Ok(report) => report,
        Err(e) if matches!(e, ProductionError::NoRoadNearby { .. }) => {
            info!("[{}] No road found nearby. ({})", tower_name, e);
            return;
        }
        Err(e) => {
            warn!("[{}] Production refused: {}", tower_name, e);
            return;
        }
    };

    info!(
        "[{}] Nearest road position: {}",
        tower_name,
        fmt_position(&report.road.surface)
    );

    for search in &report.searches {
        for (candidate, rejection) in &search.rejected {
            debug!(
                "[{}] Slot {}: candidate {} rejected: {}",
                tower_name,
                search.slot,
                fmt_position(candidate),
                rejection
            );
        }
    }

    for placement in &report.placements {
        info!(
            "[{}] Unit spawned at: {} (slot {})",
            tower_name,
            fmt_position(&placement.position),
            placement.slot
        );
    }

    if let Some(halt) = &report.halted {
        info!("[{}] {}. Stopping this batch.", tower_name, halt);
    }

    info!(
        "[{}] Units produced: {}",
        tower_name,
        report.placements.len()
    );
}

fn fmt_position(p: &Position) -> String {
    format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z)
}

/// Placeholder for tower upgrades: logs and changes nothing.
pub fn upgrade_tower_system(
    mut requests: EventReader<UpgradeTowerRequested>,
    towers: Query<&Name, With<Tower>>,
) {
    for request in requests.read() {
        match towers.get(request.tower) {
            Ok(name) => info!("[{}] Tower upgraded", name),
            Err(_) => warn!(
                "Upgrade request for {:?}, which is not a tower. Ignoring.",
                request.tower
            ),
        }
    }
}

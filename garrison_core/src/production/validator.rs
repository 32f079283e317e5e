// garrison_core/src/production/validator.rs

use nalgebra::Vector3;
use thiserror::Error;

use crate::physics::{down, PhysicsWorld};
use crate::production::params::ProductionParams;
use crate::types::{Position, SurfaceLayer};

/// Why a candidate position cannot take a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnRejection {
    #[error("position is occupied by another unit")]
    Occupied,
    #[error("spawn position is not valid (not on road)")]
    OffRoad,
}

/// Checks a candidate spawn position.
///
/// The sphere of `clearance_radius` around it must be free of units, and a
/// ray cast straight down from `ray_start_height` above it must reach a road
/// within `ray_max_distance`. The occupancy check runs first.
pub fn validate_spawn_position<W: PhysicsWorld + ?Sized>(
    world: &W,
    position: &Position,
    params: &ProductionParams,
) -> Result<(), SpawnRejection> {
    if world.check_sphere(position, params.clearance_radius, SurfaceLayer::Unit) {
        return Err(SpawnRejection::Occupied);
    }

    let ray_origin = position + Vector3::y() * params.ray_start_height;
    world
        .raycast(
            &ray_origin,
            &down(),
            params.ray_max_distance,
            SurfaceLayer::Road,
        )
        .map(|_| ())
        .ok_or(SpawnRejection::OffRoad)
}

pub fn is_spawn_position_valid<W: PhysicsWorld + ?Sized>(
    world: &W,
    position: &Position,
    params: &ProductionParams,
) -> bool {
    validate_spawn_position(world, position, params).is_ok()
}

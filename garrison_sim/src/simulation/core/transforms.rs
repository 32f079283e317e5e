// garrison_sim/src/simulation/core/transforms.rs

use bevy::prelude::{GlobalTransform, Transform as BevyTransform, Vec3 as BevyVec3};
use garrison_core::types::Position;
use nalgebra::{Unit, Vector3};

// =========================================================================
// == Coordinate Conversion Helpers ==
// =========================================================================
// The core crate and Bevy share the same world axes (Y up), so these are
// precision casts only. No frame swap happens here.

/// Converts a Bevy `Vec3` into a core `Position`.
pub fn bevy_vec3_to_position(v: BevyVec3) -> Position {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

/// Converts a core `Position` into a Bevy `Vec3`.
pub fn position_to_bevy_vec3(p: &Position) -> BevyVec3 {
    BevyVec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Converts a core direction into a Bevy `Dir3`. `None` if it collapses to zero in f32.
pub fn unit_vector_to_bevy_dir(d: &Unit<Vector3<f64>>) -> Option<bevy::math::Dir3> {
    bevy::math::Dir3::new(position_to_bevy_vec3(&d.into_inner())).ok()
}

/// World position of an entity, as a core `Position`.
pub fn global_transform_to_position(transform: &GlobalTransform) -> Position {
    bevy_vec3_to_position(transform.translation())
}

/// A transform at `p` with identity rotation and unit scale.
pub fn position_to_bevy_transform(p: &Position) -> BevyTransform {
    BevyTransform::from_translation(position_to_bevy_vec3(p))
}

// garrison_sim/src/simulation/plugins/production/physics_adapter.rs

use avian3d::prelude::{Collider, SpatialQuery, SpatialQueryFilter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use nalgebra::{Unit, Vector3};

use garrison_core::physics::PhysicsWorld;
use garrison_core::types::{ColliderHandle, ColliderHit, Position, RayHit, SurfaceLayer};

use crate::simulation::core::collision_layers::GameLayer;
use crate::simulation::core::transforms::{
    bevy_vec3_to_position, global_transform_to_position, position_to_bevy_vec3,
    unit_vector_to_bevy_dir,
};

/// Answers the core crate's physics queries with avian3d's spatial query pipeline.
///
/// Colliders spawned this frame are not in the pipeline until the next
/// physics step.
#[derive(SystemParam)]
pub struct AvianPhysicsWorld<'w, 's> {
    spatial_query: SpatialQuery<'w, 's>,
    transforms: Query<'w, 's, &'static GlobalTransform>,
}

fn layer_filter(layer: SurfaceLayer) -> SpatialQueryFilter {
    SpatialQueryFilter::from_mask(GameLayer::from(layer))
}

impl PhysicsWorld for AvianPhysicsWorld<'_, '_> {
    fn overlap_sphere(
        &self,
        center: &Position,
        radius: f64,
        layer: SurfaceLayer,
    ) -> Vec<ColliderHit> {
        let hits: Vec<ColliderHit> = self
            .spatial_query
            .shape_intersections(
                &Collider::sphere(radius as f32),
                position_to_bevy_vec3(center),
                Quat::IDENTITY,
                &layer_filter(layer),
            )
            .into_iter()
            .filter_map(|entity| {
                // A collider without a transform has no position to report.
                let transform = self.transforms.get(entity).ok()?;
                Some(ColliderHit {
                    handle: ColliderHandle::from_entity(entity),
                    position: global_transform_to_position(transform),
                })
            })
            .collect();

        if layer == SurfaceLayer::Road {
            debug!("Detected road colliders: {}", hits.len());
        }
        hits
    }

    fn check_sphere(&self, center: &Position, radius: f64, layer: SurfaceLayer) -> bool {
        !self
            .spatial_query
            .shape_intersections(
                &Collider::sphere(radius as f32),
                position_to_bevy_vec3(center),
                Quat::IDENTITY,
                &layer_filter(layer),
            )
            .is_empty()
    }

    fn raycast(
        &self,
        origin: &Position,
        direction: &Unit<Vector3<f64>>,
        max_distance: f64,
        layer: SurfaceLayer,
    ) -> Option<RayHit> {
        let dir = unit_vector_to_bevy_dir(direction)?;
        let origin_bevy = position_to_bevy_vec3(origin);
        let hit = self.spatial_query.cast_ray(
            origin_bevy,
            dir,
            max_distance as f32,
            true,
            &layer_filter(layer),
        )?;
        Some(RayHit {
            handle: ColliderHandle::from_entity(hit.entity),
            distance: hit.distance as f64,
            point: bevy_vec3_to_position(origin_bevy + dir * hit.distance),
        })
    }
}

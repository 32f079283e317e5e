// garrison_core/src/physics.rs

use nalgebra::{Unit, Vector3};

use crate::scene::ray_sphere_entry;
use crate::types::{ColliderHit, Position, RayHit, SurfaceLayer};

/// Straight down in world space.
pub fn down() -> Unit<Vector3<f64>> {
    Unit::new_unchecked(Vector3::new(0.0, -1.0, 0.0))
}

/// The contract for the physics engine that owns the scene's colliders.
///
/// The production logic never touches an engine directly. Every collider
/// lookup goes through this trait, filtered by a `SurfaceLayer`, so the same
/// search runs against avian3d inside the simulation and against an
/// in-memory `StaticScene` in tests.
pub trait PhysicsWorld {
    /// Returns every collider on `layer` that intersects the sphere.
    ///
    /// The order of the returned hits is the engine's enumeration order and
    /// carries no meaning.
    fn overlap_sphere(&self, center: &Position, radius: f64, layer: SurfaceLayer)
        -> Vec<ColliderHit>;

    /// Returns `true` if any collider on `layer` intersects the sphere.
    fn check_sphere(&self, center: &Position, radius: f64, layer: SurfaceLayer) -> bool {
        !self.overlap_sphere(center, radius, layer).is_empty()
    }

    /// Casts a ray and returns the closest hit on `layer` within `max_distance`.
    fn raycast(
        &self,
        origin: &Position,
        direction: &Unit<Vector3<f64>>,
        max_distance: f64,
        layer: SurfaceLayer,
    ) -> Option<RayHit>;
}

impl<T: PhysicsWorld + ?Sized> PhysicsWorld for &T {
    fn overlap_sphere(
        &self,
        center: &Position,
        radius: f64,
        layer: SurfaceLayer,
    ) -> Vec<ColliderHit> {
        (**self).overlap_sphere(center, radius, layer)
    }

    fn check_sphere(&self, center: &Position, radius: f64, layer: SurfaceLayer) -> bool {
        (**self).check_sphere(center, radius, layer)
    }

    fn raycast(
        &self,
        origin: &Position,
        direction: &Unit<Vector3<f64>>,
        max_distance: f64,
        layer: SurfaceLayer,
    ) -> Option<RayHit> {
        (**self).raycast(origin, direction, max_distance, layer)
    }
}

/// A `PhysicsWorld` plus units the wrapped world cannot see yet, such as
/// entities whose colliders are still waiting for the next physics step.
///
/// Pending units are spheres of `unit_radius` on the `Unit` layer. A pending
/// unit the wrapped world already reports is not reported twice.
pub struct WithPendingUnits<'a, W: ?Sized> {
    world: &'a W,
    pending: &'a [ColliderHit],
    unit_radius: f64,
}

impl<'a, W: PhysicsWorld + ?Sized> WithPendingUnits<'a, W> {
    pub fn new(world: &'a W, pending: &'a [ColliderHit], unit_radius: f64) -> Self {
        Self {
            world,
            pending,
            unit_radius,
        }
    }

    fn pending_overlaps<'b>(
        &'b self,
        center: &'b Position,
        radius: f64,
    ) -> impl Iterator<Item = &'b ColliderHit> + 'b {
        // Touching is not overlapping.
        self.pending
            .iter()
            .filter(move |unit| (unit.position - center).norm() < radius + self.unit_radius)
    }
}

impl<W: PhysicsWorld + ?Sized> PhysicsWorld for WithPendingUnits<'_, W> {
    fn overlap_sphere(
        &self,
        center: &Position,
        radius: f64,
        layer: SurfaceLayer,
    ) -> Vec<ColliderHit> {
        let mut hits = self.world.overlap_sphere(center, radius, layer);
        if layer == SurfaceLayer::Unit {
            let known = hits.len();
            for unit in self.pending_overlaps(center, radius) {
                if !hits[..known].iter().any(|hit| hit.handle == unit.handle) {
                    hits.push(*unit);
                }
            }
        }
        hits
    }

    fn check_sphere(&self, center: &Position, radius: f64, layer: SurfaceLayer) -> bool {
        self.world.check_sphere(center, radius, layer)
            || (layer == SurfaceLayer::Unit && self.pending_overlaps(center, radius).next().is_some())
    }

    fn raycast(
        &self,
        origin: &Position,
        direction: &Unit<Vector3<f64>>,
        max_distance: f64,
        layer: SurfaceLayer,
    ) -> Option<RayHit> {
        let hit = self.world.raycast(origin, direction, max_distance, layer);
        if layer != SurfaceLayer::Unit {
            return hit;
        }

        let dir = direction.into_inner();
        let pending_hit = self
            .pending
            .iter()
            .filter_map(|unit| {
                ray_sphere_entry(origin, &dir, &unit.position, self.unit_radius)
                    .map(|t| (unit.handle, t))
            })
            .filter(|(_, t)| *t <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(handle, distance)| RayHit {
                handle,
                distance,
                point: origin + dir * distance,
            });

        match (hit, pending_hit) {
            (Some(a), Some(b)) => Some(if b.distance < a.distance { b } else { a }),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StaticScene;
    use crate::types::ColliderHandle;
    use approx::assert_abs_diff_eq;

    fn pending_at(handle: u64, x: f64) -> ColliderHit {
        ColliderHit {
            handle: ColliderHandle(handle),
            position: Vector3::new(x, 1.0, 0.0),
        }
    }

    #[test]
    fn test_pending_units_block_sphere_checks() {
        let scene = StaticScene::new();
        let pending = [pending_at(100, 2.0)];
        let world = WithPendingUnits::new(&scene, &pending, 0.3);

        assert!(world.check_sphere(&Vector3::new(2.0, 1.0, 0.0), 0.5, SurfaceLayer::Unit));
        // 0.8 away is exactly touching.
        assert!(!world.check_sphere(&Vector3::new(2.8, 1.0, 0.0), 0.5, SurfaceLayer::Unit));
        // Pending units are not roads.
        assert!(!world.check_sphere(&Vector3::new(2.0, 1.0, 0.0), 0.5, SurfaceLayer::Road));
    }

    #[test]
    fn test_overlap_merges_pending_without_duplicates() {
        let mut scene = StaticScene::new();
        let seen = scene.add_obstacle(Vector3::new(0.0, 1.0, 0.0), 0.3);
        let pending = [
            ColliderHit {
                handle: seen,
                position: Vector3::new(0.0, 1.0, 0.0),
            },
            pending_at(100, 0.5),
        ];
        let world = WithPendingUnits::new(&scene, &pending, 0.3);

        let hits = world.overlap_sphere(&Vector3::new(0.0, 1.0, 0.0), 0.5, SurfaceLayer::Unit);
        let handles: Vec<_> = hits.iter().map(|hit| hit.handle).collect();
        assert_eq!(handles, vec![seen, ColliderHandle(100)]);
    }

    #[test]
    fn test_ray_reports_closest_of_world_and_pending() {
        let scene = StaticScene::new().with_obstacle(Vector3::new(0.0, 0.0, 0.0), 0.5);
        let pending = [ColliderHit {
            handle: ColliderHandle(100),
            position: Vector3::new(0.0, 3.0, 0.0),
        }];
        let world = WithPendingUnits::new(&scene, &pending, 0.5);

        let hit = world
            .raycast(&Vector3::new(0.0, 10.0, 0.0), &down(), 20.0, SurfaceLayer::Unit)
            .expect("ray should hit the pending unit");
        assert_eq!(hit.handle, ColliderHandle(100));
        assert_abs_diff_eq!(hit.distance, 6.5, epsilon = 1e-9);
    }
}

// garrison_core/src/scene.rs

//! An in-memory `PhysicsWorld` with just enough geometry for unit placement:
//! roads are axis-aligned boxes, units and enemies are spheres.

use nalgebra::{Unit, Vector3};

use crate::physics::PhysicsWorld;
use crate::types::{ColliderHandle, ColliderHit, Position, RayHit, SurfaceLayer};

/// An axis-aligned road slab.
#[derive(Debug, Clone, PartialEq)]
struct RoadSlab {
    handle: ColliderHandle,
    center: Position,
    half_extents: Vector3<f64>,
}

impl RoadSlab {
    fn min(&self) -> Position {
        self.center - self.half_extents
    }

    fn max(&self) -> Position {
        self.center + self.half_extents
    }

    /// The point of the slab closest to `point`.
    fn closest_point(&self, point: &Position) -> Position {
        let (min, max) = (self.min(), self.max());
        Vector3::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(min.y, max.y),
            point.z.clamp(min.z, max.z),
        )
    }

    /// Slab test. Returns the entry distance along the ray, or 0 if `origin` is inside.
    fn ray_entry(&self, origin: &Position, direction: &Vector3<f64>) -> Option<f64> {
        let (min, max) = (self.min(), self.max());
        let mut t_near = 0.0_f64;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            if d.abs() < f64::EPSILON {
                // Parallel to this pair of planes: must already be between them.
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}

/// A spherical unit or enemy.
#[derive(Debug, Clone, PartialEq)]
struct Obstacle {
    handle: ColliderHandle,
    center: Position,
    radius: f64,
}

/// A static collection of roads and obstacles.
///
/// Handles are assigned in insertion order, and overlap queries enumerate
/// colliders in that same order.
#[derive(Debug, Clone, Default)]
pub struct StaticScene {
    roads: Vec<RoadSlab>,
    obstacles: Vec<Obstacle>,
    next_handle: u64,
}

impl StaticScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_handle(&mut self) -> ColliderHandle {
        let handle = ColliderHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Adds a road slab and returns its handle.
    pub fn add_road(&mut self, center: Position, half_extents: Vector3<f64>) -> ColliderHandle {
        let handle = self.allocate_handle();
        self.roads.push(RoadSlab {
            handle,
            center,
            half_extents: half_extents.abs(),
        });
        handle
    }

    /// Adds a spherical unit or enemy and returns its handle.
    pub fn add_obstacle(&mut self, center: Position, radius: f64) -> ColliderHandle {
        let handle = self.allocate_handle();
        self.obstacles.push(Obstacle {
            handle,
            center,
            radius: radius.abs(),
        });
        handle
    }

    /// Builder-style variant of `add_road`.
    pub fn with_road(mut self, center: Position, half_extents: Vector3<f64>) -> Self {
        self.add_road(center, half_extents);
        self
    }

    /// Builder-style variant of `add_obstacle`.
    pub fn with_obstacle(mut self, center: Position, radius: f64) -> Self {
        self.add_obstacle(center, radius);
        self
    }
}

impl PhysicsWorld for StaticScene {
    fn overlap_sphere(
        &self,
        center: &Position,
        radius: f64,
        layer: SurfaceLayer,
    ) -> Vec<ColliderHit> {
        // Touching is not overlapping.
        match layer {
            SurfaceLayer::Road => self
                .roads
                .iter()
                .filter(|road| (road.closest_point(center) - center).norm() < radius)
                .map(|road| ColliderHit {
                    handle: road.handle,
                    position: road.center,
                })
                .collect(),
            SurfaceLayer::Unit => self
                .obstacles
                .iter()
                .filter(|obstacle| (obstacle.center - center).norm() < radius + obstacle.radius)
                .map(|obstacle| ColliderHit {
                    handle: obstacle.handle,
                    position: obstacle.center,
                })
                .collect(),
        }
    }

    fn raycast(
        &self,
        origin: &Position,
        direction: &Unit<Vector3<f64>>,
        max_distance: f64,
        layer: SurfaceLayer,
    ) -> Option<RayHit> {
        let dir = direction.into_inner();
        let closest = match layer {
            SurfaceLayer::Road => self
                .roads
                .iter()
                .filter_map(|road| road.ray_entry(origin, &dir).map(|t| (road.handle, t)))
                .filter(|(_, t)| *t <= max_distance)
                .min_by(|a, b| a.1.total_cmp(&b.1)),
            SurfaceLayer::Unit => self
                .obstacles
                .iter()
                .filter_map(|obstacle| {
                    ray_sphere_entry(origin, &dir, &obstacle.center, obstacle.radius)
                        .map(|t| (obstacle.handle, t))
                })
                .filter(|(_, t)| *t <= max_distance)
                .min_by(|a, b| a.1.total_cmp(&b.1)),
        };

        closest.map(|(handle, distance)| RayHit {
            handle,
            distance,
            point: origin + dir * distance,
        })
    }
}

/// Entry distance of a unit-direction ray into a sphere, 0 if `origin` is inside.
pub(crate) fn ray_sphere_entry(
    origin: &Position,
    direction: &Vector3<f64>,
    center: &Position,
    radius: f64,
) -> Option<f64> {
    let to_origin = origin - center;
    let c = to_origin.norm_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = to_origin.dot(direction);
    if b > 0.0 {
        // Outside and pointing away.
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::down;
    use approx::assert_abs_diff_eq;

    fn slab_scene() -> StaticScene {
        StaticScene::new().with_road(Vector3::new(0.0, 0.0, 0.0), Vector3::new(5.0, 0.1, 1.0))
    }

    #[test]
    fn test_overlap_sphere_finds_road_by_closest_point() {
        let scene = slab_scene();
        // Slab edge is at x = 5; a sphere at x = 7 with radius 2.5 reaches it.
        let hits = scene.overlap_sphere(&Vector3::new(7.0, 0.0, 0.0), 2.5, SurfaceLayer::Road);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, Vector3::zeros());

        let misses = scene.overlap_sphere(&Vector3::new(7.0, 0.0, 0.0), 1.5, SurfaceLayer::Road);
        assert!(misses.is_empty());
    }

    #[test]
    fn test_overlap_sphere_respects_layer() {
        let scene = slab_scene().with_obstacle(Vector3::new(0.0, 1.0, 0.0), 0.5);
        let units = scene.overlap_sphere(&Vector3::new(0.0, 1.0, 0.0), 0.1, SurfaceLayer::Unit);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].handle, ColliderHandle(1));

        let roads = scene.overlap_sphere(&Vector3::new(0.0, 1.0, 0.0), 0.1, SurfaceLayer::Road);
        assert!(roads.is_empty());
    }

    #[test]
    fn test_touching_spheres_do_not_overlap() {
        let scene = StaticScene::new().with_obstacle(Vector3::new(1.0, 0.0, 0.0), 0.5);
        assert!(!scene.check_sphere(&Vector3::zeros(), 0.5, SurfaceLayer::Unit));
        assert!(scene.check_sphere(&Vector3::new(0.1, 0.0, 0.0), 0.5, SurfaceLayer::Unit));
    }

    #[test]
    fn test_downward_ray_hits_top_of_slab() {
        let scene = slab_scene();
        let hit = scene
            .raycast(&Vector3::new(1.0, 10.0, 0.5), &down(), 15.0, SurfaceLayer::Road)
            .expect("ray should hit the slab");
        assert_abs_diff_eq!(hit.distance, 9.9, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.point.y, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_ray_misses_beyond_max_distance_or_beside_slab() {
        let scene = slab_scene();
        assert!(scene
            .raycast(&Vector3::new(1.0, 20.0, 0.0), &down(), 15.0, SurfaceLayer::Road)
            .is_none());
        assert!(scene
            .raycast(&Vector3::new(1.0, 10.0, 3.0), &down(), 15.0, SurfaceLayer::Road)
            .is_none());
    }

    #[test]
    fn test_ray_against_sphere() {
        let scene = StaticScene::new().with_obstacle(Vector3::zeros(), 1.0);
        let hit = scene
            .raycast(&Vector3::new(0.0, 5.0, 0.0), &down(), 10.0, SurfaceLayer::Unit)
            .expect("ray should hit the sphere");
        assert_abs_diff_eq!(hit.distance, 4.0, epsilon = 1e-9);
    }
}

// garrison_core/src/production/locator.rs

use nalgebra::Vector3;

use crate::physics::PhysicsWorld;
use crate::types::{ColliderHit, Position, RoadCandidate, SurfaceLayer};

/// Picks the hit closest to `origin`.
///
/// Equidistant hits keep the first one in enumeration order. That order is
/// whatever the physics engine produced, so ties are implementation-defined.
pub fn select_nearest<'a, I>(origin: &Position, hits: I) -> Option<(ColliderHit, f64)>
where
    I: IntoIterator<Item = &'a ColliderHit>,
{
    let mut nearest: Option<(ColliderHit, f64)> = None;
    for hit in hits {
        let distance = (hit.position - origin).norm();
        match nearest {
            Some((_, closest)) if distance >= closest => {}
            _ => nearest = Some((*hit, distance)),
        }
    }
    nearest
}

/// Finds the road collider nearest to `origin` within `detection_radius`.
///
/// Returns `None` when no road collider is in range. The spawn base of the
/// result is the road position raised by `unit_height_offset`.
pub fn nearest_road<W: PhysicsWorld + ?Sized>(
    world: &W,
    origin: &Position,
    detection_radius: f64,
    unit_height_offset: f64,
) -> Option<RoadCandidate> {
    let hits = world.overlap_sphere(origin, detection_radius, SurfaceLayer::Road);
    let (hit, distance) = select_nearest(origin, &hits)?;
    Some(RoadCandidate {
        handle: hit.handle,
        surface: hit.position,
        distance,
        spawn_base: hit.position + Vector3::y() * unit_height_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::StaticScene;
    use crate::types::ColliderHandle;
    use approx::assert_abs_diff_eq;

    fn hit(id: u64, x: f64, y: f64, z: f64) -> ColliderHit {
        ColliderHit {
            handle: ColliderHandle(id),
            position: Vector3::new(x, y, z),
        }
    }

    #[test]
    fn test_select_nearest_empty_is_none() {
        let hits: [ColliderHit; 0] = [];
        assert!(select_nearest(&Vector3::zeros(), &hits).is_none());
    }

    #[test]
    fn test_select_nearest_picks_minimum_distance() {
        let hits = [
            hit(0, 6.0, 0.0, 0.0),
            hit(1, 0.0, 0.0, -3.0),
            hit(2, 2.0, 2.0, 2.0),
            hit(3, -5.0, 0.0, 0.0),
        ];
        let (nearest, distance) =
            select_nearest(&Vector3::zeros(), &hits).expect("non-empty input");
        assert_eq!(nearest.handle, ColliderHandle(1));
        assert_abs_diff_eq!(distance, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_select_nearest_keeps_first_of_equidistant() {
        let hits = [hit(7, 0.0, 0.0, 2.0), hit(8, 2.0, 0.0, 0.0)];
        let (nearest, _) = select_nearest(&Vector3::zeros(), &hits).expect("non-empty input");
        assert_eq!(nearest.handle, ColliderHandle(7));
    }

    #[test]
    fn test_nearest_road_raises_spawn_base() {
        let scene = StaticScene::new()
            .with_road(Vector3::new(8.0, 0.0, 0.0), Vector3::new(0.5, 0.1, 0.5))
            .with_road(Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.5, 0.1, 0.5));

        let road = nearest_road(&scene, &Vector3::zeros(), 10.0, 0.5).expect("road in range");
        assert_eq!(road.handle, ColliderHandle(1));
        assert_eq!(road.surface, Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(road.spawn_base, Vector3::new(2.0, 0.5, 0.0));
        assert_abs_diff_eq!(road.distance, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nearest_road_out_of_range_is_none() {
        let scene =
            StaticScene::new().with_road(Vector3::new(30.0, 0.0, 0.0), Vector3::new(1.0, 0.1, 1.0));
        assert!(nearest_road(&scene, &Vector3::zeros(), 10.0, 1.0).is_none());
    }

    #[test]
    fn test_road_at_origin_is_a_real_result() {
        let scene = StaticScene::new().with_road(Vector3::zeros(), Vector3::new(1.0, 0.1, 1.0));
        let road = nearest_road(&scene, &Vector3::zeros(), 10.0, 0.0).expect("road in range");
        assert_eq!(road.spawn_base, Vector3::zeros());
    }
}

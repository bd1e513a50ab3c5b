//! Raycasting against pickable candidates.

use crate::bounds::Bounds;
use engine_core::{Ray, Vec2, Vec3};
use renderer::Camera;

/// Result of a raycast query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit<K> {
    /// Caller's key for the candidate that was hit.
    pub key: K,
    /// Distance along the ray to the hit point.
    pub distance: f32,
    /// World position of the hit.
    pub point: Vec3,
}

/// Cast a ray and return every hit, nearest first.
/// Equal distances keep candidate order.
pub fn raycast_all<K, I>(ray: &Ray, candidates: I) -> Vec<RaycastHit<K>>
where
    I: IntoIterator<Item = (K, Bounds)>,
{
    let mut hits: Vec<RaycastHit<K>> = candidates
        .into_iter()
        .filter_map(|(key, bounds)| {
            bounds.intersect(ray).map(|distance| RaycastHit {
                key,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();

    // Stable sort (use unwrap_or to avoid panic on NaN)
    hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

/// Resolve a pointer position in NDC to the nearest accepted candidate.
///
/// Hits are walked nearest first and the first one `accept` admits wins, so
/// a rejected candidate never hides an accepted one behind it. Only the
/// supplied candidates are tested; callers pass the pickable set and nothing
/// else.
pub fn pick<K, I, F>(ndc: Vec2, camera: &Camera, candidates: I, mut accept: F) -> Option<RaycastHit<K>>
where
    I: IntoIterator<Item = (K, Bounds)>,
    F: FnMut(&K) -> bool,
{
    let Some(ray) = camera.ray_from_ndc(ndc) else {
        log::debug!("no pick ray for ndc {:?}", ndc);
        return None;
    };
    raycast_all(&ray, candidates).into_iter().find(|hit| accept(&hit.key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Shape, Transform};
    use renderer::Projection;

    fn billboard_at(z: f32) -> Bounds {
        Bounds::from_shape(
            &Shape::Quad { width: 3.0, height: 3.5 },
            &Transform::from_position(Vec3::new(0.0, 0.0, z)),
        )
    }

    fn camera_at_z10(projection: Projection) -> Camera {
        let mut camera = Camera {
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 10.0)),
            projection,
            ..Default::default()
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn empty_candidate_set_never_hits() {
        let camera = camera_at_z10(Projection::Perspective { fov_degrees: 75.0 });
        for ndc in [Vec2::ZERO, Vec2::new(-1.0, 1.0), Vec2::new(0.7, -0.3)] {
            assert!(pick::<u32, _, _>(ndc, &camera, Vec::new(), |_| true).is_none());
        }
    }

    #[test]
    fn nearest_wins_regardless_of_order() {
        let camera = camera_at_z10(Projection::Perspective { fov_degrees: 75.0 });
        // Distances 10 and 5 from the camera.
        let candidates = vec![("far", billboard_at(0.0)), ("near", billboard_at(5.0))];
        let hit = pick(Vec2::ZERO, &camera, candidates, |_| true).unwrap();
        assert_eq!(hit.key, "near");
        assert!((hit.distance - 5.0).abs() < 1e-4);
    }

    #[test]
    fn ties_go_to_first_registered() {
        let camera = camera_at_z10(Projection::Orthographic { half_height: 5.0 });
        let candidates = vec![(1, billboard_at(0.0)), (2, billboard_at(0.0))];
        assert_eq!(pick(Vec2::ZERO, &camera, candidates, |_| true).unwrap().key, 1);
    }

    #[test]
    fn rejected_hit_does_not_hide_accepted_one_behind() {
        let camera = camera_at_z10(Projection::Perspective { fov_degrees: 75.0 });
        let candidates = vec![("behind", billboard_at(0.0)), ("front", billboard_at(5.0))];
        let hit = pick(Vec2::ZERO, &camera, candidates, |key| *key != "front").unwrap();
        assert_eq!(hit.key, "behind");
        assert!((hit.distance - 10.0).abs() < 1e-4);

        let none = pick(Vec2::ZERO, &camera, vec![(0, billboard_at(0.0))], |_| false);
        assert!(none.is_none());
    }

    #[test]
    fn raycast_all_sorted_nearest_first() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z).unwrap();
        let hits = raycast_all(
            &ray,
            vec![(0, billboard_at(-5.0)), (1, billboard_at(5.0)), (2, billboard_at(0.0))],
        );
        let keys: Vec<_> = hits.iter().map(|h| h.key).collect();
        assert_eq!(keys, vec![1, 2, 0]);
    }

    #[test]
    fn pointer_off_target_misses() {
        let camera = camera_at_z10(Projection::Perspective { fov_degrees: 75.0 });
        let hit = pick(Vec2::new(0.9, 0.9), &camera, vec![(0, billboard_at(0.0))], |_| true);
        assert!(hit.is_none());
    }
}

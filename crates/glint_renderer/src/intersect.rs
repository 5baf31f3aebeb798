//! Ray-scene intersection.
//!
//! The scene is searched exhaustively; with a handful of spheres the
//! parallel pixel loop dominates cost and an acceleration structure would
//! not pay for itself.

use glint_core::Scene;
use glint_math::{Ray, Vec3};

/// Record of the nearest ray-sphere intersection.
///
/// Built fresh per trace. A miss is represented by `trace_ray` returning
/// `None` rather than a sentinel distance.
#[derive(Debug, Clone, Copy)]
pub struct HitPayload {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub world_position: Vec3,
    /// Unit surface normal at the hit point
    pub world_normal: Vec3,
    /// Index of the hit sphere within `Scene::spheres`
    pub object_index: usize,
}

/// Find the nearest sphere intersection along a ray, if any.
///
/// Solves a*t^2 + b*t + c = 0 per sphere with
///   a = dot(dir, dir)
///   b = 2 * dot(origin - center, dir)
///   c = dot(origin - center, origin - center) - radius^2
/// A non-positive discriminant (tangency included) is a miss, and so is any
/// root at t <= 0: hits behind the origin would be self-intersections or
/// behind-camera geometry.
pub fn trace_ray(ray: &Ray, scene: &Scene) -> Option<HitPayload> {
    let mut hit_distance = f32::MAX;
    let mut closest_sphere = None;

    for (index, sphere) in scene.spheres.iter().enumerate() {
        let origin = ray.origin - sphere.center;

        let a = ray.direction.length_squared();
        let b = 2.0 * origin.dot(ray.direction);
        let c = origin.length_squared() - sphere.radius * sphere.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            continue;
        }

        // Near root only; the far root is the ray leaving the sphere.
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        if t > 0.0 && t < hit_distance {
            hit_distance = t;
            closest_sphere = Some(index);
        }
    }

    closest_sphere.map(|object_index| closest_hit(ray, hit_distance, object_index, scene))
}

/// Build the payload for a confirmed hit.
fn closest_hit(ray: &Ray, distance: f32, object_index: usize, scene: &Scene) -> HitPayload {
    let sphere = &scene.spheres[object_index];

    // Solve in the sphere's local frame; the normal of a centered,
    // undistorted sphere is just the normalized hit position.
    let local_origin = ray.origin - sphere.center;
    let local_position = local_origin + ray.direction * distance;

    HitPayload {
        distance,
        world_position: local_position + sphere.center,
        world_normal: local_position.normalize(),
        object_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Material, Sphere};

    fn scene_with(spheres: Vec<Sphere>) -> Scene {
        Scene {
            spheres,
            materials: vec![Material::default()],
        }
    }

    #[test]
    fn test_through_center_hit_distance_and_normal() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, 0)]);
        let origin = Vec3::new(0.0, 0.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 0.0, -1.0));

        let hit = trace_ray(&ray, &scene).expect("ray through center must hit");

        // distance(origin, center) - radius
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.world_position - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        // Normal points away from the center, back toward the origin.
        assert!((hit.world_normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-5);
        assert_eq!(hit.object_index, 0);
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, 0)]);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::new(0.0, 0.0, 1.0));

        assert!(trace_ray(&ray, &scene).is_none());
    }

    #[test]
    fn test_tangent_ray_is_a_miss() {
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, 0)]);
        // Grazes the sphere at x = 1 exactly: discriminant == 0.
        let ray = Ray::new(Vec3::new(1.0, 0.0, 3.0), Vec3::new(0.0, 0.0, -1.0));

        assert!(trace_ray(&ray, &scene).is_none());
    }

    #[test]
    fn test_nearest_of_several_spheres_wins() {
        let scene = scene_with(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, 0),
            Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, 0),
        ]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let hit = trace_ray(&ray, &scene).unwrap();
        assert_eq!(hit.object_index, 1);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_origin_is_rejected() {
        let scene = scene_with(vec![Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, 0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(trace_ray(&ray, &scene).is_none());
    }

    #[test]
    fn test_empty_scene_misses() {
        let scene = scene_with(Vec::new());
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(trace_ray(&ray, &scene).is_none());
    }

    #[test]
    fn test_origin_inside_sphere_near_root_behind() {
        // From the center, the near root is negative and the far root is
        // ignored, so an inside ray reports a miss. Boundary policy carried
        // from the nearest-positive-near-root rule.
        let scene = scene_with(vec![Sphere::new(Vec3::ZERO, 1.0, 0)]);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(trace_ray(&ray, &scene).is_none());
    }
}

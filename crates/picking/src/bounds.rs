//! Bounding geometry and ray intersection.

use engine_core::{Ray, Shape, Transform};
use glam::Vec3;

/// Hits closer than this are treated as behind the ray origin.
const MIN_DISTANCE: f32 = 1e-4;

/// World-space geometry a ray is tested against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Double-sided rectangle spanned by two orthonormal axes.
    Quad {
        center: Vec3,
        right: Vec3,
        up: Vec3,
        half_width: f32,
        half_height: f32,
    },
    Sphere { center: Vec3, radius: f32 },
}

impl Bounds {
    /// Derive world-space bounds for a shape placed with `transform`.
    /// Quads keep their planar extent; everything else uses a bounding sphere.
    pub fn from_shape(shape: &Shape, transform: &Transform) -> Self {
        match *shape {
            Shape::Quad { width, height } => Bounds::Quad {
                center: transform.position,
                right: transform.right(),
                up: transform.up(),
                half_width: 0.5 * width * transform.scale.x.abs(),
                half_height: 0.5 * height * transform.scale.y.abs(),
            },
            Shape::Sphere { .. } | Shape::Cone { .. } => Bounds::Sphere {
                center: transform.position,
                radius: shape.bounding_radius() * transform.scale.abs().max_element(),
            },
        }
    }

    /// Distance along the ray to the first intersection in front of its origin.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        match *self {
            Bounds::Quad {
                center,
                right,
                up,
                half_width,
                half_height,
            } => intersect_quad(ray, center, right, up, half_width, half_height),
            Bounds::Sphere { center, radius } => intersect_sphere(ray, center, radius),
        }
    }
}

fn intersect_quad(
    ray: &Ray,
    center: Vec3,
    right: Vec3,
    up: Vec3,
    half_width: f32,
    half_height: f32,
) -> Option<f32> {
    let normal = right.cross(up);
    let denom = ray.direction.dot(normal);
    if denom.abs() < 1e-6 {
        // Parallel to the plane
        return None;
    }
    let t = (center - ray.origin).dot(normal) / denom;
    if t <= MIN_DISTANCE {
        return None;
    }
    let offset = ray.at(t) - center;
    let inside = offset.dot(right).abs() <= half_width && offset.dot(up).abs() <= half_height;
    inside.then_some(t)
}

fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near > MIN_DISTANCE {
        Some(near)
    } else if far > MIN_DISTANCE {
        // Origin inside the sphere
        Some(far)
    } else {
        None
    }
}

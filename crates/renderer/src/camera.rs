//! Scene camera: pose plus perspective or orthographic projection.

use bytemuck::{Pod, Zeroable};
use engine_core::{Ray, Transform};
use glam::{Mat4, Vec2, Vec3};

/// Projection kind and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees.
    Perspective { fov_degrees: f32 },
    /// Half the vertical extent of the view volume in world units.
    /// The horizontal half extent follows from the aspect ratio.
    Orthographic { half_height: f32 },
}

/// The single active scene camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera transform (position and rotation).
    pub transform: Transform,
    pub projection: Projection,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            projection: Projection::Perspective { fov_degrees: 75.0 },
            near: 0.1,
            far: 1000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl Camera {
    /// Perspective camera at `position`.
    pub fn perspective(position: Vec3, fov_degrees: f32) -> Self {
        Self {
            transform: Transform::from_position(position),
            projection: Projection::Perspective { fov_degrees },
            ..Default::default()
        }
    }

    /// Orthographic camera at `position`.
    pub fn orthographic(position: Vec3, half_height: f32) -> Self {
        Self {
            transform: Transform::from_position(position),
            projection: Projection::Orthographic { half_height },
            ..Default::default()
        }
    }

    /// Set clipping planes.
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Turn the camera to face `target`.
    pub fn look_at(&mut self, target: Vec3) {
        self.transform.look_at(target, Vec3::Y);
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = eye + self.transform.forward();
        Mat4::look_at_rh(eye, target, self.transform.up())
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_degrees } => {
                Mat4::perspective_rh(fov_degrees.to_radians(), self.aspect, self.near, self.far)
            }
            Projection::Orthographic { half_height } => {
                let half_width = half_height * self.aspect;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.far,
                )
            }
        }
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Build a picking ray through a point in normalized device coordinates.
    ///
    /// Perspective rays start at the eye and pass through the unprojected
    /// point on the near plane. Orthographic rays start at that near-plane
    /// point and run along the camera's forward vector.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection_matrix().inverse();
        // glam's projections map the near plane to depth 0.
        let on_near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        if !on_near.is_finite() {
            return None;
        }
        match self.projection {
            Projection::Perspective { .. } => {
                Ray::new(self.transform.position, on_near - self.transform.position)
            }
            Projection::Orthographic { .. } => Ray::new(on_near, self.forward()),
        }
    }

    /// Get camera position.
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Get camera forward direction.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.proj = camera.projection_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let pos = camera.position();
        self.position = [pos.x, pos.y, pos.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_neg_z(projection: Projection) -> Camera {
        let mut camera = Camera {
            transform: Transform::from_position(Vec3::new(0.0, 0.0, 10.0)),
            projection,
            ..Default::default()
        };
        camera.set_aspect(800, 600);
        camera.look_at(Vec3::ZERO);
        camera
    }

    #[test]
    fn perspective_center_ray_is_forward() {
        let camera = looking_down_neg_z(Projection::Perspective { fov_degrees: 75.0 });
        let ray = camera.ray_from_ndc(Vec2::ZERO).unwrap();
        assert!(ray.origin.distance(camera.position()) < 1e-5);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-4);
    }

    #[test]
    fn perspective_corner_ray_diverges() {
        let camera = looking_down_neg_z(Projection::Perspective { fov_degrees: 90.0 });
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0)).unwrap();
        // 90 degree vertical fov: top edge ray is 45 degrees up.
        assert!((ray.direction.y - ray.direction.z.abs()).abs() < 1e-4);
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let camera = looking_down_neg_z(Projection::Orthographic { half_height: 5.0 });
        let a = camera.ray_from_ndc(Vec2::new(-1.0, -1.0)).unwrap();
        let b = camera.ray_from_ndc(Vec2::new(1.0, 1.0)).unwrap();
        assert!(a.direction.distance(b.direction) < 1e-5);
        assert!(a.direction.distance(Vec3::NEG_Z) < 1e-4);
        // Origins span the frustum: half width = 5 * 4/3.
        assert!((b.origin.x - 5.0 * 4.0 / 3.0).abs() < 1e-3);
        assert!((b.origin.y - 5.0).abs() < 1e-3);
    }

    #[test]
    fn set_aspect_guards_zero_height() {
        let mut camera = Camera::default();
        camera.set_aspect(640, 0);
        assert_eq!(camera.aspect, 640.0);
    }

    #[test]
    fn uniform_tracks_camera_position() {
        let camera = looking_down_neg_z(Projection::Perspective { fov_degrees: 60.0 });
        let mut uniform = CameraUniform::new();
        uniform.update(&camera);
        assert_eq!(uniform.position, [0.0, 0.0, 10.0, 1.0]);
    }
}

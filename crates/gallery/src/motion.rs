//! Focal object motion and camera rigs.
//!
//! The focal position is a pure function of absolute session time, so
//! re-evaluating any instant reproduces the same pose and frame pacing has no
//! effect on the path.

use glam::{Vec2, Vec3};
use renderer::Camera;

/// Circular path around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalOrbit {
    pub radius: f32,
    /// Radians per second.
    pub angular_speed: f32,
    /// Constant y of the path.
    pub height: f32,
}

impl FocalOrbit {
    /// Position at `t` seconds after session start.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let angle = self.angular_speed * t;
        Vec3::new(self.radius * angle.sin(), self.height, self.radius * angle.cos())
    }
}

/// User-driven camera circling a fixed target at a fixed distance (no pan, no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub target: Vec3,
    pub distance: f32,
    /// Radians per dragged pixel.
    pub sensitivity: f32,
    yaw: f32,
    pitch: f32,
}

impl OrbitRig {
    /// Rig whose initial eye is `position`.
    pub fn from_position(position: Vec3, target: Vec3, sensitivity: f32) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let (yaw, pitch) = if distance > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / distance).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            target,
            distance,
            sensitivity,
            yaw,
            pitch: pitch.clamp(-max_pitch(), max_pitch()),
        }
    }

    /// Rotate by a pointer drag in pixels. Dragging down raises the eye.
    pub fn process_drag(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch = (self.pitch + delta.y * self.sensitivity).clamp(-max_pitch(), max_pitch());
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}

// Clamp pitch to prevent flipping
fn max_pitch() -> f32 {
    std::f32::consts::FRAC_PI_2 - 0.01
}

/// How the camera pose is derived each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraRig {
    Orbit(OrbitRig),
    /// Rigid chase: constant offset from the focal object, always facing it.
    Chase { offset: Vec3 },
}

/// Drives the focal object and the camera once per frame.
#[derive(Debug, Clone)]
pub struct MotionController {
    pub orbit: FocalOrbit,
    pub rig: CameraRig,
}

impl MotionController {
    pub fn new(orbit: FocalOrbit, rig: CameraRig) -> Self {
        Self { orbit, rig }
    }

    /// Evaluate the scene at `elapsed` seconds since session start: returns the
    /// focal position and updates the camera pose.
    pub fn advance(&self, elapsed: f32, camera: &mut Camera) -> Vec3 {
        let t = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        let focal = self.orbit.position_at(t);
        match self.rig {
            CameraRig::Orbit(rig) => {
                camera.transform.position = rig.eye();
                camera.look_at(rig.target);
            }
            CameraRig::Chase { offset } => {
                camera.transform.position = focal + offset;
                camera.look_at(focal);
            }
        }
        focal
    }

    /// Forward a pointer drag to the rig. Chase cameras ignore it.
    pub fn drag(&mut self, delta: Vec2) {
        if let CameraRig::Orbit(rig) = &mut self.rig {
            rig.process_drag(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Projection;

    const R: f32 = 10.0;

    fn chase() -> MotionController {
        MotionController::new(
            FocalOrbit {
                radius: R,
                angular_speed: 1.0,
                height: 1.0,
            },
            CameraRig::Chase {
                offset: Vec3::new(20.0, 20.0, 20.0),
            },
        )
    }

    fn ortho() -> Camera {
        Camera::orthographic(Vec3::ZERO, 15.0)
    }

    #[test]
    fn same_time_same_position() {
        let motion = chase();
        let mut camera = ortho();
        for t in [0.0, 0.016, 1.5, 42.0, 3600.25] {
            let a = motion.advance(t, &mut camera);
            // Intervening frames must not matter.
            motion.advance(t + 7.0, &mut camera);
            let b = motion.advance(t, &mut camera);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn path_stays_on_circle() {
        let motion = chase();
        let mut camera = ortho();
        for i in 0..500 {
            let p = motion.advance(i as f32 * 0.37, &mut camera);
            assert!((p.x * p.x + p.z * p.z - R * R).abs() < 1e-3);
            assert_eq!(p.y, 1.0);
        }
    }

    #[test]
    fn starts_on_positive_z() {
        let p = chase().advance(0.0, &mut ortho());
        assert!(p.distance(Vec3::new(0.0, 1.0, R)) < 1e-6);
    }

    #[test]
    fn chase_camera_keeps_offset_and_faces_focal() {
        let motion = chase();
        let mut camera = ortho();
        for i in 0..200 {
            let focal = motion.advance(i as f32 * 0.1, &mut camera);
            let offset = camera.position() - focal;
            assert!(offset.distance(Vec3::new(20.0, 20.0, 20.0)) < 1e-4);
            let facing = (focal - camera.position()).normalize();
            assert!(camera.forward().distance(facing) < 1e-4);
        }
    }

    #[test]
    fn invalid_time_is_treated_as_start() {
        let motion = chase();
        let mut camera = ortho();
        assert_eq!(motion.advance(f32::NAN, &mut camera), motion.advance(0.0, &mut camera));
        assert_eq!(motion.advance(-3.0, &mut camera), motion.advance(0.0, &mut camera));
    }

    #[test]
    fn orbit_rig_round_trips_initial_position() {
        let start = Vec3::new(0.0, 5.0, 20.0);
        let rig = OrbitRig::from_position(start, Vec3::ZERO, 0.005);
        assert!(rig.eye().distance(start) < 1e-4);
    }

    #[test]
    fn orbit_drag_keeps_distance_and_ignores_time() {
        let mut motion = MotionController::new(
            FocalOrbit {
                radius: R,
                angular_speed: 1.0,
                height: 1.0,
            },
            CameraRig::Orbit(OrbitRig::from_position(Vec3::new(0.0, 5.0, 20.0), Vec3::ZERO, 0.005)),
        );
        let mut camera = Camera {
            projection: Projection::Perspective { fov_degrees: 75.0 },
            ..Default::default()
        };
        motion.advance(0.0, &mut camera);
        let before = camera.position();
        motion.advance(5.0, &mut camera);
        assert_eq!(camera.position(), before);

        motion.drag(Vec2::new(120.0, -40.0));
        motion.advance(5.0, &mut camera);
        assert_ne!(camera.position(), before);
        assert!((camera.position().length() - before.length()).abs() < 1e-3);
        assert!(camera.forward().distance(-camera.position().normalize()) < 1e-4);
    }

    #[test]
    fn orbit_pitch_is_clamped() {
        let mut rig = OrbitRig::from_position(Vec3::new(0.0, 5.0, 20.0), Vec3::ZERO, 0.01);
        rig.process_drag(Vec2::new(0.0, 10_000.0));
        assert!(rig.pitch() < std::f32::consts::FRAC_PI_2);
        assert!(rig.eye().y > 0.0);
    }
}

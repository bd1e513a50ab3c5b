//! Scene construction and the explicit context shared by the frame loop,
//! the picker and the overlay.

use crate::config::{CameraMode, GalleryConfig};
use crate::motion::{CameraRig, FocalOrbit, MotionController, OrbitRig};
use crate::overlay::Overlay;
use crate::registry::EntityRegistry;
use engine_core::{Entity, Material, ProjectRecord, Quat, Shape, Transform};
use glam::{Vec2, Vec3};
use procgen::PlacementGenerator;
use renderer::{Camera, Light, RenderBackend};

const SKY_COLOR: u32 = 0xaaccff;
const GROUND_SIZE: f32 = 100.0;
const TREE_RADIUS: f32 = 1.0;
const TREE_HEIGHT: f32 = 4.0;
const TREE_COLOR: u32 = 0x226622;
const FOCAL_RADIUS: f32 = 1.0;
const FOCAL_COLOR: u32 = 0xffffff;

/// Billboard placement parameters kept for when metadata arrives.
#[derive(Debug, Clone, Copy)]
struct BillboardLayout {
    spread: f32,
    exclusion: f32,
}

/// All mutable scene state. Owned by the frame loop and lent out by reference.
pub struct SceneContext {
    pub registry: EntityRegistry,
    pub camera: Camera,
    pub motion: MotionController,
    pub overlay: Overlay,
    focal: Entity,
    placement: PlacementGenerator,
    billboards: BillboardLayout,
}

impl SceneContext {
    /// Build ground, scenery, lights, the focal object and the camera.
    pub fn build(config: &GalleryConfig, backend: &mut dyn RenderBackend) -> Self {
        let mut registry = EntityRegistry::new();
        let mut placement = PlacementGenerator::from_seed(config.seed);

        backend.set_background(SKY_COLOR);
        backend.add_light(Light::Directional {
            position: Vec3::new(0.0, 20.0, 10.0),
            color: 0xffffff,
            intensity: 1.0,
        });
        backend.add_light(Light::Ambient {
            color: 0xcccccc,
            intensity: 0.5,
        });

        // Ground: a quad laid flat.
        registry.spawn_decorative(
            Shape::Quad {
                width: GROUND_SIZE,
                height: GROUND_SIZE,
            },
            &Material::lambert(0xffffff),
            Transform::from_position_rotation(Vec3::ZERO, Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            backend,
        );

        let tree_material = Material::lambert(TREE_COLOR);
        for ground in placement.place(config.scenery_count, 0.0, config.scenery_spread) {
            registry.spawn_decorative(
                Shape::Cone {
                    radius: TREE_RADIUS,
                    height: TREE_HEIGHT,
                },
                &tree_material,
                Transform::from_position(Vec3::new(ground.x, TREE_HEIGHT * 0.5, ground.y)),
                backend,
            );
        }

        let orbit = FocalOrbit {
            radius: config.orbit_radius,
            angular_speed: config.angular_speed,
            height: config.focal_height,
        };
        let focal = registry.spawn_focal(
            Shape::Sphere { radius: FOCAL_RADIUS },
            &Material::standard(FOCAL_COLOR),
            Transform::from_position(orbit.position_at(0.0)),
            backend,
        );

        let (camera, rig) = match config.camera_mode {
            CameraMode::Orbit => {
                let position = Vec3::from_array(config.orbit_camera_position);
                let rig = OrbitRig::from_position(position, Vec3::ZERO, config.orbit_sensitivity);
                (Camera::perspective(position, config.fov_degrees), CameraRig::Orbit(rig))
            }
            CameraMode::Chase => {
                let offset = Vec3::from_array(config.chase_offset);
                (
                    Camera::orthographic(orbit.position_at(0.0) + offset, config.chase_half_height),
                    CameraRig::Chase { offset },
                )
            }
        };
        let mut camera = camera.with_clip(config.near, config.far);
        camera.set_aspect(config.window_width, config.window_height);

        log::info!(
            "scene built: {} entities, {:?} camera",
            registry.len(),
            config.camera_mode
        );

        let mut context = Self {
            registry,
            camera,
            motion: MotionController::new(orbit, rig),
            overlay: Overlay::new(),
            focal,
            placement,
            billboards: BillboardLayout {
                spread: config.billboard_spread,
                exclusion: config.billboard_exclusion,
            },
        };
        context.advance(0.0, backend);
        context
    }

    pub fn focal(&self) -> Entity {
        self.focal
    }

    /// Place the focal object and camera for `elapsed` seconds into the session.
    pub fn advance(&mut self, elapsed: f32, backend: &mut dyn RenderBackend) {
        let position = self.motion.advance(elapsed, &mut self.camera);
        self.registry.set_position(self.focal, position, backend);
        backend.update_camera(&self.camera);
    }

    /// Turn a metadata batch into billboards in one step.
    pub fn apply_projects(&mut self, records: Vec<ProjectRecord>, backend: &mut dyn RenderBackend) -> usize {
        let positions: Vec<Vec2> =
            self.placement
                .place(records.len(), self.billboards.exclusion, self.billboards.spread);
        let added = self.registry.apply_batch(records, &positions, backend);
        added.len()
    }

    /// Recompute projection parameters for a new viewport. Entities stay put.
    pub fn resize(&mut self, width: u32, height: u32, backend: &mut dyn RenderBackend) {
        self.camera.set_aspect(width, height);
        backend.update_camera(&self.camera);
    }
}

//! Rendering collaborator interface and a headless implementation.

use crate::camera::{Camera, CameraUniform};
use engine_core::{Material, Shape, Transform};
use glam::Vec3;
use thiserror::Error;

/// Opaque handle to an object owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u32);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown render handle {0:?}")]
    UnknownHandle(RenderHandle),
    #[error("render backend lost: {0}")]
    Lost(String),
}

/// Light descriptor submitted once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional { position: Vec3, color: u32, intensity: f32 },
    Ambient { color: u32, intensity: f32 },
}

/// Everything the scene core needs from a renderer.
pub trait RenderBackend {
    /// Create a drawable and return its handle.
    fn create_entity(&mut self, shape: &Shape, material: &Material, transform: &Transform) -> RenderHandle;

    /// Move or rotate an existing drawable.
    fn set_transform(&mut self, handle: RenderHandle, transform: &Transform) -> Result<(), RenderError>;

    fn add_light(&mut self, light: Light);

    /// Clear colour, 0xRRGGBB.
    fn set_background(&mut self, color: u32);

    /// Push new camera pose and projection parameters.
    fn update_camera(&mut self, camera: &Camera);

    /// Draw the current frame.
    fn render_frame(&mut self) -> Result<(), RenderError>;
}

#[derive(Debug, Clone)]
struct Instance {
    shape: Shape,
    material: Material,
    transform: Transform,
}

/// Backend that keeps scene state in memory and draws nothing.
/// Used by the desktop shell (no GPU path yet) and by tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    instances: Vec<Instance>,
    lights: Vec<Light>,
    background: u32,
    camera: CameraUniform,
    frames_rendered: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn transform(&self, handle: RenderHandle) -> Option<Transform> {
        self.instances.get(handle.0 as usize).map(|i| i.transform)
    }

    pub fn shape(&self, handle: RenderHandle) -> Option<Shape> {
        self.instances.get(handle.0 as usize).map(|i| i.shape)
    }

    pub fn material(&self, handle: RenderHandle) -> Option<&Material> {
        self.instances.get(handle.0 as usize).map(|i| &i.material)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn camera_uniform(&self) -> &CameraUniform {
        &self.camera
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl RenderBackend for HeadlessBackend {
    fn create_entity(&mut self, shape: &Shape, material: &Material, transform: &Transform) -> RenderHandle {
        let handle = RenderHandle(self.instances.len() as u32);
        self.instances.push(Instance {
            shape: *shape,
            material: material.clone(),
            transform: *transform,
        });
        log::trace!("create {:?} {:?} at {:?}", handle, shape, transform.position);
        handle
    }

    fn set_transform(&mut self, handle: RenderHandle, transform: &Transform) -> Result<(), RenderError> {
        let instance = self
            .instances
            .get_mut(handle.0 as usize)
            .ok_or(RenderError::UnknownHandle(handle))?;
        instance.transform = *transform;
        Ok(())
    }

    fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    fn set_background(&mut self, color: u32) {
        self.background = color;
    }

    fn update_camera(&mut self, camera: &Camera) {
        self.camera.update(camera);
    }

    fn render_frame(&mut self) -> Result<(), RenderError> {
        self.frames_rendered += 1;
        if self.frames_rendered % 600 == 0 {
            log::debug!(
                "headless frame {} ({} instances)",
                self.frames_rendered,
                self.instances.len()
            );
        }
        Ok(())
    }
}

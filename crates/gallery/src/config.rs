//! Gallery configuration (window, camera, scene layout). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which camera contract the session runs with. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Perspective camera the user can drag around the scene origin.
    #[default]
    Orbit,
    /// Orthographic isometric camera locked to the focal object.
    Chase,
}

/// Startup settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    #[serde(default)]
    pub camera_mode: CameraMode,

    /// Focal object orbit radius.
    #[serde(default = "default_orbit_radius")]
    pub orbit_radius: f32,
    /// Focal object angular speed in radians per second.
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f32,
    /// Focal object resting height (sphere radius, so it sits on the ground).
    #[serde(default = "default_focal_height")]
    pub focal_height: f32,

    /// Orbit mode: initial camera position; the camera looks at the origin.
    #[serde(default = "default_orbit_camera_position")]
    pub orbit_camera_position: [f32; 3],
    /// Orbit mode: vertical field of view in degrees.
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    /// Orbit mode: radians per dragged pixel.
    #[serde(default = "default_orbit_sensitivity")]
    pub orbit_sensitivity: f32,
    /// Chase mode: camera position relative to the focal object.
    #[serde(default = "default_chase_offset")]
    pub chase_offset: [f32; 3],
    /// Chase mode: half the vertical extent of the orthographic view.
    #[serde(default = "default_chase_half_height")]
    pub chase_half_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,

    /// Number of decorative trees.
    #[serde(default = "default_scenery_count")]
    pub scenery_count: usize,
    /// Half side of the square trees are scattered over.
    #[serde(default = "default_spread")]
    pub scenery_spread: f32,
    /// Half side of the square billboards are scattered over.
    #[serde(default = "default_spread")]
    pub billboard_spread: f32,
    /// Radius around the origin kept free of billboards (0 = none).
    #[serde(default)]
    pub billboard_exclusion: f32,

    /// Project metadata file, relative to the working directory.
    #[serde(default = "default_metadata_path")]
    pub metadata_path: PathBuf,
    /// Fixed placement seed for reproducible layouts.
    #[serde(default)]
    pub seed: Option<u64>,

    /// When true the open overlay covers the viewport and a click outside
    /// its content closes it; when false such clicks go to the scene.
    #[serde(default = "default_true")]
    pub modal_overlay: bool,
    /// Cursor travel in pixels that turns a press into a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    /// Frame delta ceiling in milliseconds.
    #[serde(default = "default_max_frame_delta_ms")]
    pub max_frame_delta_ms: u64,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_orbit_radius() -> f32 {
    10.0
}
fn default_angular_speed() -> f32 {
    1.0
}
fn default_focal_height() -> f32 {
    1.0
}
fn default_orbit_camera_position() -> [f32; 3] {
    [0.0, 5.0, 20.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_orbit_sensitivity() -> f32 {
    0.005
}
fn default_chase_offset() -> [f32; 3] {
    [20.0, 20.0, 20.0]
}
fn default_chase_half_height() -> f32 {
    15.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}
fn default_scenery_count() -> usize {
    30
}
fn default_spread() -> f32 {
    40.0
}
fn default_metadata_path() -> PathBuf {
    PathBuf::from("projects.json")
}
fn default_true() -> bool {
    true
}
fn default_drag_threshold() -> f32 {
    input::DEFAULT_DRAG_THRESHOLD
}
fn default_max_frame_delta_ms() -> u64 {
    100
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            camera_mode: CameraMode::default(),
            orbit_radius: default_orbit_radius(),
            angular_speed: default_angular_speed(),
            focal_height: default_focal_height(),
            orbit_camera_position: default_orbit_camera_position(),
            fov_degrees: default_fov(),
            orbit_sensitivity: default_orbit_sensitivity(),
            chase_offset: default_chase_offset(),
            chase_half_height: default_chase_half_height(),
            near: default_near(),
            far: default_far(),
            scenery_count: default_scenery_count(),
            scenery_spread: default_spread(),
            billboard_spread: default_spread(),
            billboard_exclusion: 0.0,
            metadata_path: default_metadata_path(),
            seed: None,
            modal_overlay: default_true(),
            drag_threshold: default_drag_threshold(),
            max_frame_delta_ms: default_max_frame_delta_ms(),
        }
    }
}

impl GalleryConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::from_ron(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            },
            Err(e) => log::debug!("No config at {:?} ({}), using defaults", path, e),
        }
        Self::default()
    }

    /// Parse config from RON text.
    pub fn from_ron(data: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(data)
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GalleryConfig::from_ron("(camera_mode: Chase, seed: Some(9), scenery_count: 5)").unwrap();
        assert_eq!(config.camera_mode, CameraMode::Chase);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.scenery_count, 5);
        assert_eq!(config.orbit_radius, 10.0);
        assert_eq!(config.metadata_path, PathBuf::from("projects.json"));
        assert!(config.modal_overlay);
    }

    #[test]
    fn invalid_text_is_an_error() {
        assert!(GalleryConfig::from_ron("(camera_mode: Sideways)").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = GalleryConfig::load_from(Path::new("/nonexistent/gallery/config.ron"));
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.camera_mode, CameraMode::Orbit);
    }
}

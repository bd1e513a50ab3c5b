//! Project gallery: a small 3D scene where each project is a clickable
//! billboard that opens a detail overlay.

pub mod config;
pub mod metadata;
pub mod motion;
pub mod overlay;
pub mod registry;
pub mod scene;
pub mod session;

pub use config::{CameraMode, GalleryConfig};
pub use metadata::{FetchStatus, FileSource, MetadataError, MetadataSource, MetadataTask};
pub use overlay::{Overlay, OverlayEffect, OverlayPresenter, OverlayState, OverlayView};
pub use scene::SceneContext;
pub use session::Session;

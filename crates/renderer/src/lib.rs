//! Camera model and the rendering collaborator interface.
//!
//! GPU submission lives behind [`RenderBackend`]; the scene core only ever
//! talks to that trait.

pub mod backend;
pub mod camera;

pub use backend::*;
pub use camera::*;

//! Pointer picking: ray construction and nearest-hit resolution against
//! bounding geometry.

pub mod bounds;
pub mod raycast;

pub use bounds::*;
pub use raycast::*;

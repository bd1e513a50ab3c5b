//! Procedural placement of scene content.

pub mod placement;

pub use placement::*;

//! Core scene types shared by every gallery crate.
//!
//! This crate provides the foundational types used across the scene core:
//! - Transform and ray primitives
//! - Session time management
//! - Entity components (shape, material, interaction, project records)

pub mod components;
pub mod ray;
pub mod time;
pub mod transform;

pub use components::*;
pub use ray::*;
pub use time::*;
pub use transform::*;

// Re-export commonly used types
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use hecs::{Entity, World};

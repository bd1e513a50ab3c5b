//! Entity components shared between the scene, the picker and the render backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Geometry descriptor. Dimensions are in local space; the render backend owns
/// the actual mesh, the core only derives bounding geometry from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Flat rectangle in the local XY plane, facing +Z, centered on the origin.
    Quad { width: f32, height: f32 },
    Sphere { radius: f32 },
    /// Upright cone centered on the origin (apex at +height/2).
    Cone { radius: f32, height: f32 },
}

impl Shape {
    /// Radius of a sphere around the local origin that contains the shape.
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Quad { width, height } => 0.5 * (width * width + height * height).sqrt(),
            Shape::Sphere { radius } => radius,
            Shape::Cone { radius, height } => (radius * radius + 0.25 * height * height).sqrt(),
        }
    }
}

/// Shading model hint for the render backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shading {
    #[default]
    Lambert,
    Standard,
    /// Flat texture, unaffected by lights.
    Unlit,
}

/// Material descriptor. Opaque to the core.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// 0xRRGGBB
    pub color: u32,
    pub shading: Shading,
    /// Texture URI, loaded by the backend.
    pub texture: Option<String>,
}

impl Material {
    pub fn lambert(color: u32) -> Self {
        Self {
            color,
            shading: Shading::Lambert,
            texture: None,
        }
    }

    pub fn standard(color: u32) -> Self {
        Self {
            color,
            shading: Shading::Standard,
            texture: None,
        }
    }

    pub fn textured(uri: impl Into<String>) -> Self {
        Self {
            color: 0xffffff,
            shading: Shading::Unlit,
            texture: Some(uri.into()),
        }
    }
}

/// Project metadata bound to a billboard.
///
/// Unknown keys (an external `link`, tags, ...) are kept verbatim in `extra`
/// and never interpreted beyond existence checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProjectRecord {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            extra: Map::new(),
        }
    }

    /// A record can open the overlay only if it has a non-blank title.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// External link, if the record carries one as a string.
    pub fn link(&self) -> Option<&str> {
        self.extra.get("link").and_then(Value::as_str)
    }
}

/// Whether an entity takes part in picking.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    /// Ground, scenery, the focal object. Never returned by a pick.
    Decorative,
    Pickable(ProjectRecord),
}

impl Interaction {
    pub fn record(&self) -> Option<&ProjectRecord> {
        match self {
            Interaction::Decorative => None,
            Interaction::Pickable(record) => Some(record),
        }
    }
}

/// Tag component for the object the motion controller drives.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocalObject;

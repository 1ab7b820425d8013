//! Raycast results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::ContentFlags;
use super::world::BrushId;

/// Nearest hit of a raycast through the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// World-space impact point.
    pub point: Vec3,

    /// Surface normal at the impact point, pointing away from the surface.
    ///
    /// Zero when the ray started inside the brush.
    pub normal: Vec3,

    /// Distance from the ray origin to `point`.
    pub distance: f32,

    /// The brush that was hit.
    pub brush: BrushId,

    /// Content flags of the brush that was hit.
    pub contents: ContentFlags,
}

impl RayHit {
    /// Whether the hit surface is flat enough to stand on.
    #[inline]
    pub fn is_walkable(&self, min_normal_z: f32) -> bool {
        self.normal.z >= min_normal_z
    }
}

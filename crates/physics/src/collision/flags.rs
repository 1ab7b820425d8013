//! Content flags for collision filtering.

use serde::{Deserialize, Serialize};

/// Content flags describe what type of volume a brush is.
///
/// Raycasts carry a mask and only consider brushes whose contents intersect
/// it (e.g. the ground probe ignores triggers, grapple targeting sees bodies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry: walls, floors.
    pub const SOLID: Self = Self(1 << 0);

    /// Blocks characters but not visibility.
    pub const PLAYER_CLIP: Self = Self(1 << 1);

    /// Trigger volume, never blocks anything.
    pub const TRIGGER: Self = Self(1 << 2);

    /// Character capsule.
    pub const PLAYER_BODY: Self = Self(1 << 3);

    /// Mask for character movement and ground probes.
    pub const MASK_PLAYER_SOLID: Self = Self(Self::SOLID.0 | Self::PLAYER_CLIP.0 | Self::PLAYER_BODY.0);

    /// Mask for line-of-sight queries such as grapple targeting.
    pub const MASK_VISIBILITY: Self = Self(Self::SOLID.0 | Self::PLAYER_BODY.0);

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

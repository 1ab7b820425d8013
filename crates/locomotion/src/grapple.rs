//! Grapple targeting.
//!
//! Activation casts a single ray from the eye along the view direction and
//! stores the nearest hit as the grapple target. Activation and release only
//! change targeting state; nothing here moves the character.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::motion::{EntityId, WorldQuery};

/// Result of a grapple activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrappleOutcome {
    /// A target was found and is now held.
    Attached(Vec3),
    /// Already grappling; no query was made.
    AlreadyGrappling,
    /// The ray hit nothing within range.
    Missed,
}

/// Grapple targeting state.
///
/// The target is present exactly while grappling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrappleState {
    target: Option<Vec3>,
}

impl GrappleState {
    /// Not grappling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to acquire a target.
    ///
    /// While already grappling this is a no-op and performs no raycast.
    pub fn activate(
        &mut self,
        world: &impl WorldQuery,
        origin: Vec3,
        direction: Vec3,
        range: f32,
        ignore: EntityId,
    ) -> GrappleOutcome {
        if self.target.is_some() {
            return GrappleOutcome::AlreadyGrappling;
        }

        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return GrappleOutcome::Missed;
        }

        match world.raycast(origin, direction, range, ignore) {
            Some(point) => {
                self.target = Some(point);
                GrappleOutcome::Attached(point)
            }
            None => GrappleOutcome::Missed,
        }
    }

    /// Drop the current target. Returns whether a target was held.
    pub fn release(&mut self) -> bool {
        self.target.take().is_some()
    }

    /// Whether a target is held.
    #[inline]
    pub fn is_grappling(&self) -> bool {
        self.target.is_some()
    }

    /// The held target point.
    #[inline]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

//! Character body tuning values.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Configuration for the kinematic character body.
///
/// Values use the same centimetre-scale units as the locomotion config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    // ========================================================================
    // Physics
    // ========================================================================
    /// Gravity acceleration (units/second²).
    pub gravity: f32,

    /// Horizontal acceleration toward the requested velocity (units/second²).
    pub max_acceleration: f32,

    /// Fraction of `max_acceleration` available while airborne.
    pub air_control: f32,

    /// Braking treats speeds below this as this value, so slow drift stops.
    pub stop_speed: f32,

    // ========================================================================
    // Ground
    // ========================================================================
    /// Distance below the feet at which the body still snaps to ground.
    pub ground_snap_distance: f32,

    /// Minimum surface normal Z to be considered ground.
    /// 0.7 ≈ 45 degrees
    pub walkable_normal_z: f32,

    // ========================================================================
    // View
    // ========================================================================
    /// Eye position relative to the capsule centre (forward, right, up).
    pub eye_offset: Vec3,

    /// Maximum pitch up or down (degrees).
    pub pitch_limit: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            max_acceleration: 2048.0,
            air_control: 0.05,
            stop_speed: 10.0,

            ground_snap_distance: 2.0,
            walkable_normal_z: 0.7,

            eye_offset: Vec3::new(-10.0, 0.0, 60.0),
            pitch_limit: 89.0,
        }
    }
}

//! Locomotion tuning values.
//!
//! All speed, friction, capsule, jump and grapple constants live here so they
//! can be tuned or loaded from a JSON file. Values are in source units
//! (centimetre scale).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Collision capsule dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapsuleSize {
    /// Half of the total capsule height, caps included.
    pub half_height: f32,
    /// Radius of the cylinder and end caps.
    pub radius: f32,
}

impl CapsuleSize {
    /// Full-height standing capsule.
    pub const STANDING: Self = Self {
        half_height: 96.0,
        radius: 55.0,
    };

    /// Reduced capsule used while sliding.
    pub const SLIDING: Self = Self {
        half_height: 48.0,
        radius: 30.0,
    };

    pub const fn new(half_height: f32, radius: f32) -> Self {
        Self { half_height, radius }
    }
}

/// Configuration for the locomotion controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    // ========================================================================
    // Speeds
    // ========================================================================
    /// Walking speed when neither sprinting nor sliding.
    pub base_walk_speed: f32,

    /// Walking speed while sprinting.
    pub sprint_walk_speed: f32,

    /// Walking speed while sliding.
    pub slide_walk_speed: f32,

    // ========================================================================
    // Collision
    // ========================================================================
    pub standing_capsule: CapsuleSize,

    pub slide_capsule: CapsuleSize,

    // ========================================================================
    // Friction
    // ========================================================================
    /// Braking friction outside of a slide.
    pub braking_friction: f32,

    /// Braking friction while sliding (zero keeps momentum).
    pub slide_braking_friction: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Upward launch velocity of each jump.
    pub jump_impulse: f32,

    /// Jumps available between landings (ground jump included).
    pub max_jump_count: u32,

    // ========================================================================
    // Grapple
    // ========================================================================
    /// Maximum grapple targeting distance from the eye.
    pub grapple_range: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            base_walk_speed: 1200.0,
            sprint_walk_speed: 1800.0,
            slide_walk_speed: 800.0,

            standing_capsule: CapsuleSize::STANDING,
            slide_capsule: CapsuleSize::SLIDING,

            braking_friction: 2.0,
            slide_braking_friction: 0.0,

            jump_impulse: 600.0,
            max_jump_count: 2,

            grapple_range: 1000.0,
        }
    }
}

impl LocomotionConfig {
    /// A faster, floatier profile with a third air jump.
    pub fn arcade() -> Self {
        Self {
            base_walk_speed: 1500.0,
            sprint_walk_speed: 2400.0,
            slide_walk_speed: 1100.0,
            jump_impulse: 700.0,
            max_jump_count: 3,
            grapple_range: 1500.0,
            ..Default::default()
        }
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields keep their default values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        log::info!("loaded locomotion config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, speed) in [
            ("base_walk_speed", self.base_walk_speed),
            ("sprint_walk_speed", self.sprint_walk_speed),
            ("slide_walk_speed", self.slide_walk_speed),
        ] {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {speed}"
                )));
            }
        }

        for (name, friction) in [
            ("braking_friction", self.braking_friction),
            ("slide_braking_friction", self.slide_braking_friction),
        ] {
            if !friction.is_finite() || friction < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-negative, got {friction}"
                )));
            }
        }

        for (name, capsule) in [
            ("standing_capsule", self.standing_capsule),
            ("slide_capsule", self.slide_capsule),
        ] {
            if !(capsule.radius > 0.0 && capsule.radius <= capsule.half_height) {
                return Err(ConfigError::Invalid(format!(
                    "{name} needs 0 < radius <= half_height, got {:?}",
                    capsule
                )));
            }
        }

        if !self.jump_impulse.is_finite() || self.jump_impulse <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "jump_impulse must be positive, got {}",
                self.jump_impulse
            )));
        }
        if self.max_jump_count == 0 {
            return Err(ConfigError::Invalid(
                "max_jump_count must be at least 1".to_string(),
            ));
        }
        if !self.grapple_range.is_finite() || self.grapple_range <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "grapple_range must be positive, got {}",
                self.grapple_range
            )));
        }

        Ok(())
    }
}

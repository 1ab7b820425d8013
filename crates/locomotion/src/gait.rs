//! Sprint and slide parameter sets.
//!
//! Sprint and slide are independent flags layered on top of the jump state
//! machine. Every transition writes absolute values taken from the config,
//! never values saved from before the transition:
//!
//! - Sprint start/stop: walk speed only
//! - Slide start/stop: walk speed, braking friction and capsule
//!
//! Both flags may be set at once. Slide values then override the sprint speed,
//! and stopping the slide restores the base speed rather than the sprint speed.

use serde::{Deserialize, Serialize};

use crate::config::{CapsuleSize, LocomotionConfig};
use crate::motion::MotionIntegrator;

/// Parameters a gait transition pushes to the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaitChange {
    pub max_walk_speed: f32,
    /// `None` leaves friction untouched.
    pub braking_friction: Option<f32>,
    /// `None` leaves the capsule untouched.
    pub capsule: Option<CapsuleSize>,
}

impl GaitChange {
    /// Push the changed parameters to the integrator.
    pub fn apply(&self, motion: &mut impl MotionIntegrator) {
        motion.set_max_walk_speed(self.max_walk_speed);
        if let Some(friction) = self.braking_friction {
            motion.set_braking_friction(friction);
        }
        if let Some(capsule) = self.capsule {
            motion.set_capsule(capsule.half_height, capsule.radius);
        }
    }
}

/// Sprint/slide flags and the movement parameters currently in effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitState {
    pub is_sprinting: bool,
    pub is_sliding: bool,
    /// Walk speed last pushed to the integrator.
    pub max_walk_speed: f32,
    /// Braking friction last pushed to the integrator.
    pub braking_friction: f32,
    /// Capsule last pushed to the integrator.
    pub capsule: CapsuleSize,
}

impl Default for GaitState {
    fn default() -> Self {
        Self::standing(&LocomotionConfig::default())
    }
}

impl GaitState {
    /// Walking, upright, default friction.
    pub fn standing(config: &LocomotionConfig) -> Self {
        Self {
            is_sprinting: false,
            is_sliding: false,
            max_walk_speed: config.base_walk_speed,
            braking_friction: config.braking_friction,
            capsule: config.standing_capsule,
        }
    }

    /// The full standing parameter set, for pushing at spawn.
    pub fn standing_change(config: &LocomotionConfig) -> GaitChange {
        GaitChange {
            max_walk_speed: config.base_walk_speed,
            braking_friction: Some(config.braking_friction),
            capsule: Some(config.standing_capsule),
        }
    }

    /// Set the sprint flag and speed. Friction and capsule are untouched.
    pub fn start_sprint(&mut self, config: &LocomotionConfig) -> GaitChange {
        self.is_sprinting = true;
        self.max_walk_speed = config.sprint_walk_speed;
        GaitChange {
            max_walk_speed: self.max_walk_speed,
            braking_friction: None,
            capsule: None,
        }
    }

    /// Clear the sprint flag and return to the base speed.
    pub fn stop_sprint(&mut self, config: &LocomotionConfig) -> GaitChange {
        self.is_sprinting = false;
        self.max_walk_speed = config.base_walk_speed;
        GaitChange {
            max_walk_speed: self.max_walk_speed,
            braking_friction: None,
            capsule: None,
        }
    }

    /// Set the slide flag with slide speed, friction and capsule.
    pub fn start_slide(&mut self, config: &LocomotionConfig) -> GaitChange {
        self.is_sliding = true;
        self.max_walk_speed = config.slide_walk_speed;
        self.braking_friction = config.slide_braking_friction;
        self.capsule = config.slide_capsule;
        self.change()
    }

    /// Force the standing values, whether or not a slide was active.
    pub fn stop_slide(&mut self, config: &LocomotionConfig) -> GaitChange {
        self.is_sliding = false;
        self.max_walk_speed = config.base_walk_speed;
        self.braking_friction = config.braking_friction;
        self.capsule = config.standing_capsule;
        self.change()
    }

    fn change(&self) -> GaitChange {
        GaitChange {
            max_walk_speed: self.max_walk_speed,
            braking_friction: Some(self.braking_friction),
            capsule: Some(self.capsule),
        }
    }
}

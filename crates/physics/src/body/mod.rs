//! Kinematic character body.
//!
//! A capsule that walks on walkable ground, falls under gravity, and obeys
//! the launch/speed/friction/capsule commands of the locomotion controller.

mod character;
mod config;

pub use character::{CharacterBody, StepReport, MAX_DELTA_TIME};
pub use config::BodyConfig;

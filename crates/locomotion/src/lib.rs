//! First-person locomotion controller.
//!
//! Converts discrete input events into transitions of a small movement state
//! machine and issues commands to an external movement integrator.
//!
//! # Architecture
//!
//! The controller never owns its collaborators. Each operation receives them
//! by argument:
//!
//! - [`MotionIntegrator`]: applies movement input and impulses, reports whether
//!   the character is falling, and accepts speed/friction/capsule parameters
//! - [`WorldQuery`]: directional raycast returning the nearest hit point
//!
//! ```text
//! input event ──► InputBindings ──► LocomotionController ──► MotionIntegrator
//!                                          │                       │
//!                                          ▼                       │
//!                                      WorldQuery      on_landed ◄─┘
//! ```
//!
//! # Sub-systems
//!
//! - **Jump**: ground jump plus one air jump, reset on landing
//! - **Gait**: sprint and slide parameter sets (speed, friction, capsule)
//! - **Grapple**: raycast targeting from the eye along the view direction
//!
//! World is Z-up. Yaw 0 faces +X, and the right vector at yaw 0 is +Y.

pub mod config;
pub mod controller;
pub mod gait;
pub mod grapple;
pub mod input;
pub mod jump;
pub mod motion;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{CapsuleSize, ConfigError, LocomotionConfig};
pub use controller::{LocomotionController, MovementProfile};
pub use gait::GaitState;
pub use grapple::{GrappleOutcome, GrappleState};
pub use input::{
    ActionValue, BindingError, Dispatch, InputAction, InputBindings, LocomotionCommand,
    TriggerEvent,
};
pub use jump::{JumpOutcome, JumpState};
pub use motion::{EntityId, MotionIntegrator, WorldQuery};

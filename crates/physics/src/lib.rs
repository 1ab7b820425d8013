//! Reference collaborators for the locomotion controller.
//!
//! # Architecture
//!
//! - **Collision**: a parry3d brush world answering filtered raycasts, which
//!   also serves as the controller's `WorldQuery`
//! - **Body**: a kinematic capsule implementing `MotionIntegrator`, reporting
//!   landings back to the caller after each step
//!
//! ```ignore
//! let mut world = CollisionWorld::new();
//! world.add_box(floor_center, floor_half_extents, ContentFlags::SOLID);
//!
//! let mut body = CharacterBody::spawn(player_id, spawn_feet, BodyConfig::default(), &mut world);
//! let mut controller = LocomotionController::with_default_config(player_id);
//! controller.apply_spawn_defaults(&mut body);
//!
//! // Each frame:
//! let report = body.step(delta_time, &mut world);
//! if report.landed {
//!     controller.on_landed();
//! }
//! ```

pub mod body;
pub mod collision;

// Re-export commonly used types
pub use body::{BodyConfig, CharacterBody, StepReport, MAX_DELTA_TIME};
pub use collision::{BrushId, CollisionWorld, ContentFlags, RayHit};

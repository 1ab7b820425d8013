//! Collision queries for the reference integrator and world.
//!
//! The world is a flat list of parry3d brushes (boxes for level geometry,
//! capsules for character bodies). Queries are single rays filtered by a
//! content mask and an optional owner to ignore.
//!
//! # Key Types
//!
//! - [`CollisionWorld`]: the brush list, also the locomotion `WorldQuery`
//! - [`RayHit`]: nearest hit of a raycast
//! - [`ContentFlags`]: what a brush is, and what a query collides with

mod flags;
mod trace;
mod world;

pub use flags::ContentFlags;
pub use trace::RayHit;
pub use world::{BrushId, CollisionWorld};

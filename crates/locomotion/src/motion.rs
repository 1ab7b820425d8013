//! Collaborator interfaces consumed by the locomotion core.
//!
//! The core issues commands through these traits and never implements them.
//! `fpsmove_physics` provides reference implementations.

use glam::Vec3;

/// Unique identifier for entities (used to exclude the character from its own queries).
pub type EntityId = u32;

/// The physics/movement subsystem that turns input and impulses into motion.
///
/// The integrator is the sole source of falling/grounded truth. It raises the
/// landing notification by calling
/// [`LocomotionController::on_landed`](crate::LocomotionController::on_landed)
/// exactly once per airborne-to-grounded transition.
pub trait MotionIntegrator {
    /// Queue movement along `direction` (unit vector) scaled by `scale`.
    fn add_movement_input(&mut self, direction: Vec3, scale: f32);

    /// Apply yaw and pitch deltas to the view orientation.
    fn add_orientation_input(&mut self, yaw_delta: f32, pitch_delta: f32);

    /// Whether the character is currently airborne.
    fn is_falling(&self) -> bool;

    /// Apply a velocity impulse.
    ///
    /// With `override_xy` the horizontal velocity is replaced instead of added
    /// to, and likewise `override_z` for the vertical component.
    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool);

    /// Set the maximum walking speed.
    fn set_max_walk_speed(&mut self, speed: f32);

    /// Set the braking friction factor.
    fn set_braking_friction(&mut self, friction: f32);

    /// Resize the collision capsule.
    fn set_capsule(&mut self, half_height: f32, radius: f32);

    /// Horizontal forward vector of the character.
    fn actor_forward(&self) -> Vec3;

    /// Horizontal right vector of the character.
    fn actor_right(&self) -> Vec3;

    /// Eye (camera) position in world space.
    fn view_origin(&self) -> Vec3;

    /// Unit look direction of the camera, including pitch.
    fn view_forward(&self) -> Vec3;
}

/// World collision queries.
pub trait WorldQuery {
    /// Cast a ray and return the nearest hit point within `max_distance`.
    ///
    /// Geometry owned by `ignore` is excluded from the query.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: EntityId,
    ) -> Option<Vec3>;
}

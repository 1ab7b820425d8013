//! Test doubles for the collaborator traits.

use std::cell::Cell;

use glam::Vec3;

use crate::motion::{EntityId, MotionIntegrator, WorldQuery};

/// A single call made on the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    MovementInput(Vec3, f32),
    OrientationInput(f32, f32),
    Launch(Vec3, bool, bool),
    MaxWalkSpeed(f32),
    BrakingFriction(f32),
    Capsule(f32, f32),
}

/// Integrator that records every command and lets tests set falling state.
#[derive(Debug, Clone)]
pub struct RecordingIntegrator {
    pub falling: bool,
    pub calls: Vec<Call>,
    pub max_walk_speed: f32,
    pub braking_friction: f32,
    pub capsule: (f32, f32),
    pub forward: Vec3,
    pub right: Vec3,
    pub eye: Vec3,
    pub look: Vec3,
}

impl Default for RecordingIntegrator {
    fn default() -> Self {
        Self {
            falling: false,
            calls: Vec::new(),
            max_walk_speed: 1200.0,
            braking_friction: 2.0,
            capsule: (96.0, 55.0),
            forward: Vec3::X,
            right: Vec3::Y,
            eye: Vec3::new(-10.0, 0.0, 60.0),
            look: Vec3::X,
        }
    }
}

impl RecordingIntegrator {
    pub fn launches(&self) -> Vec<Vec3> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Launch(velocity, _, _) => Some(*velocity),
                _ => None,
            })
            .collect()
    }
}

impl MotionIntegrator for RecordingIntegrator {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.calls.push(Call::MovementInput(direction, scale));
    }

    fn add_orientation_input(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.calls.push(Call::OrientationInput(yaw_delta, pitch_delta));
    }

    fn is_falling(&self) -> bool {
        self.falling
    }

    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool) {
        self.calls.push(Call::Launch(velocity, override_xy, override_z));
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
        self.calls.push(Call::MaxWalkSpeed(speed));
    }

    fn set_braking_friction(&mut self, friction: f32) {
        self.braking_friction = friction;
        self.calls.push(Call::BrakingFriction(friction));
    }

    fn set_capsule(&mut self, half_height: f32, radius: f32) {
        self.capsule = (half_height, radius);
        self.calls.push(Call::Capsule(half_height, radius));
    }

    fn actor_forward(&self) -> Vec3 {
        self.forward
    }

    fn actor_right(&self) -> Vec3 {
        self.right
    }

    fn view_origin(&self) -> Vec3 {
        self.eye
    }

    fn view_forward(&self) -> Vec3 {
        self.look
    }
}

/// World with a single infinite wall facing -X.
#[derive(Debug, Default)]
pub struct ScriptedWorld {
    wall_x: Option<f32>,
    queries: Cell<usize>,
    last_ignore: Cell<Option<EntityId>>,
}

impl ScriptedWorld {
    pub fn wall_at_x(x: f32) -> Self {
        Self {
            wall_x: Some(x),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    pub fn last_ignore(&self) -> Option<EntityId> {
        self.last_ignore.get()
    }
}

impl WorldQuery for ScriptedWorld {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        ignore: EntityId,
    ) -> Option<Vec3> {
        self.queries.set(self.queries.get() + 1);
        self.last_ignore.set(Some(ignore));

        let wall_x = self.wall_x?;
        if direction.x <= 0.0 {
            return None;
        }
        let distance = (wall_x - origin.x) / direction.x;
        (distance >= 0.0 && distance <= max_distance).then(|| origin + direction * distance)
    }
}

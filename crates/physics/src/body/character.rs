//! Kinematic capsule character.

use glam::Vec3;

use fpsmove_locomotion::{CapsuleSize, EntityId, MotionIntegrator};

use super::config::BodyConfig;
use crate::collision::{BrushId, CollisionWorld, ContentFlags};

/// Largest time step the body will integrate in one call (~15 FPS).
pub const MAX_DELTA_TIME: f32 = 0.066;

/// Default walk speed and friction until the controller pushes its own.
const INITIAL_WALK_SPEED: f32 = 1200.0;
const INITIAL_BRAKING_FRICTION: f32 = 2.0;

/// What happened during one [`CharacterBody::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// The body touched walkable ground after being airborne.
    ///
    /// True exactly once per airborne-to-grounded transition. Forward it to
    /// `LocomotionController::on_landed`.
    pub landed: bool,

    /// Standing on walkable ground at the end of the step.
    pub grounded: bool,

    /// Horizontal movement was cut short by geometry.
    pub blocked: bool,
}

/// A capsule character moved by input, impulses and gravity.
///
/// `position` is the bottom of the capsule (the feet). The body registers a
/// capsule brush owned by its entity in the collision world and keeps it in
/// sync after every step.
#[derive(Debug, Clone)]
pub struct CharacterBody {
    config: BodyConfig,
    entity: EntityId,
    brush: BrushId,

    position: Vec3,
    velocity: Vec3,

    /// View angles in degrees. Yaw 0 faces +X.
    yaw: f32,
    pitch: f32,

    max_walk_speed: f32,
    braking_friction: f32,
    capsule: CapsuleSize,
    capsule_dirty: bool,

    /// Movement input accumulated since the last step.
    pending_input: Vec3,
    grounded: bool,
}

impl CharacterBody {
    /// Create a body for `entity` with its feet at `feet` and register its
    /// capsule in `world`. The body starts grounded if walkable ground is
    /// within snap distance below.
    pub fn spawn(entity: EntityId, feet: Vec3, config: BodyConfig, world: &mut CollisionWorld) -> Self {
        let capsule = CapsuleSize::STANDING;
        let brush = world.add_capsule(
            entity,
            feet + Vec3::Z * capsule.half_height,
            capsule.half_height,
            capsule.radius,
            ContentFlags::PLAYER_BODY,
        );

        let mut body = Self {
            config,
            entity,
            brush,
            position: feet,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            max_walk_speed: INITIAL_WALK_SPEED,
            braking_friction: INITIAL_BRAKING_FRICTION,
            capsule,
            capsule_dirty: false,
            pending_input: Vec3::ZERO,
            grounded: false,
        };

        body.check_ground(world, feet.z);
        body.sync_brush(world);
        log::debug!("spawned body {} at {:?} grounded={}", entity, body.position, body.grounded);
        body
    }

    /// Advance the body by `delta_time` seconds.
    ///
    /// Consumes the movement input accumulated since the last step.
    pub fn step(&mut self, delta_time: f32, world: &mut CollisionWorld) -> StepReport {
        // Clamp delta time to prevent physics explosions
        let delta_time = delta_time.clamp(0.0, MAX_DELTA_TIME);

        let input = std::mem::take(&mut self.pending_input);
        let input = Vec3::new(input.x, input.y, 0.0).clamp_length_max(1.0);

        if self.grounded {
            self.ground_move(input, delta_time);
        } else {
            self.air_move(input, delta_time);
        }

        let start_z = self.position.z;
        let blocked = self.move_horizontal(world, delta_time);
        self.position.z += self.velocity.z * delta_time;

        let landed = self.check_ground(world, start_z);
        if landed {
            log::debug!("body {} landed at {:?}", self.entity, self.position);
        }

        self.sync_brush(world);

        StepReport {
            landed,
            grounded: self.grounded,
            blocked,
        }
    }

    // ========================================================================
    // Ground Movement
    // ========================================================================

    fn ground_move(&mut self, input: Vec3, delta_time: f32) {
        let horizontal = Vec3::new(self.velocity.x, self.velocity.y, 0.0);

        let horizontal = if input.length_squared() > 0.0 {
            let target = input * self.max_walk_speed;
            move_towards(horizontal, target, self.config.max_acceleration * delta_time)
                .clamp_length_max(self.max_walk_speed)
        } else {
            self.brake(horizontal, delta_time)
        };

        self.velocity = Vec3::new(horizontal.x, horizontal.y, 0.0);
    }

    fn brake(&self, horizontal: Vec3, delta_time: f32) -> Vec3 {
        let speed = horizontal.length();
        if speed < 1e-4 {
            return Vec3::ZERO;
        }

        let control = speed.max(self.config.stop_speed);
        let drop = control * self.braking_friction * delta_time;
        let new_speed = (speed - drop).max(0.0);

        horizontal * (new_speed / speed)
    }

    // ========================================================================
    // Air Movement
    // ========================================================================

    fn air_move(&mut self, input: Vec3, delta_time: f32) {
        self.velocity.z -= self.config.gravity * delta_time;

        let air_acceleration = self.config.max_acceleration * self.config.air_control;
        self.velocity += input * air_acceleration * delta_time;
    }

    // ========================================================================
    // Collision
    // ========================================================================

    /// Move horizontally, stopping at the first blocking surface.
    fn move_horizontal(&mut self, world: &CollisionWorld, delta_time: f32) -> bool {
        let delta = Vec3::new(self.velocity.x, self.velocity.y, 0.0) * delta_time;
        let distance = delta.length();
        if distance < 1e-6 {
            return false;
        }
        let direction = delta / distance;

        let hit = world.raycast(
            self.center(),
            direction,
            distance + self.capsule.radius,
            ContentFlags::MASK_PLAYER_SOLID,
            Some(self.entity),
        );

        match hit {
            Some(hit) => {
                let allowed = (hit.distance - self.capsule.radius).max(0.0);
                self.position += direction * allowed;

                // Drop the velocity component going into the surface
                let normal = Vec3::new(hit.normal.x, hit.normal.y, 0.0).normalize_or_zero();
                let into = self.velocity.dot(normal);
                if into < 0.0 {
                    self.velocity -= normal * into;
                }
                true
            }
            None => {
                self.position += delta;
                false
            }
        }
    }

    /// Probe for walkable ground below the feet. Returns whether the body
    /// just landed.
    fn check_ground(&mut self, world: &CollisionWorld, start_z: f32) -> bool {
        // Don't detect ground while moving upward (just launched)
        if self.velocity.z > 0.0 {
            self.grounded = false;
            return false;
        }

        // Probe from the capsule centre at the higher of the old and new
        // positions, so a fast fall can't skip past the floor surface.
        let top = start_z.max(self.position.z) + self.capsule.half_height;
        let origin = Vec3::new(self.position.x, self.position.y, top);
        let reach = top - self.position.z + self.config.ground_snap_distance;

        let hit = world.raycast(
            origin,
            -Vec3::Z,
            reach,
            ContentFlags::MASK_PLAYER_SOLID,
            Some(self.entity),
        );

        match hit {
            Some(hit) if hit.is_walkable(self.config.walkable_normal_z) => {
                let landed = !self.grounded;
                self.position.z = hit.point.z;
                self.velocity.z = 0.0;
                self.grounded = true;
                landed
            }
            _ => {
                self.grounded = false;
                false
            }
        }
    }

    fn sync_brush(&mut self, world: &mut CollisionWorld) {
        let center = self.center();
        if self.capsule_dirty {
            world.resize_capsule(self.brush, center, self.capsule.half_height, self.capsule.radius);
            self.capsule_dirty = false;
        } else {
            world.set_brush_center(self.brush, center);
        }
    }

    // ========================================================================
    // State queries
    // ========================================================================

    /// Feet position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Capsule centre.
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::Z * self.capsule.half_height
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn horizontal_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, self.velocity.y, 0.0).length()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Yaw in degrees, `[0, 360)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, positive looks up.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn max_walk_speed(&self) -> f32 {
        self.max_walk_speed
    }

    pub fn braking_friction(&self) -> f32 {
        self.braking_friction
    }

    pub fn capsule(&self) -> CapsuleSize {
        self.capsule
    }
}

impl MotionIntegrator for CharacterBody {
    fn add_movement_input(&mut self, direction: Vec3, scale: f32) {
        self.pending_input += direction * scale;
    }

    fn add_orientation_input(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw = (self.yaw + yaw_delta).rem_euclid(360.0);
        let limit = self.config.pitch_limit;
        self.pitch = (self.pitch + pitch_delta).clamp(-limit, limit);
    }

    fn is_falling(&self) -> bool {
        !self.grounded
    }

    fn launch(&mut self, velocity: Vec3, override_xy: bool, override_z: bool) {
        if override_xy {
            self.velocity.x = velocity.x;
            self.velocity.y = velocity.y;
        } else {
            self.velocity.x += velocity.x;
            self.velocity.y += velocity.y;
        }

        if override_z {
            self.velocity.z = velocity.z;
        } else {
            self.velocity.z += velocity.z;
        }

        if self.velocity.z > 0.0 {
            self.grounded = false;
        }
    }

    fn set_max_walk_speed(&mut self, speed: f32) {
        self.max_walk_speed = speed;
    }

    fn set_braking_friction(&mut self, friction: f32) {
        self.braking_friction = friction;
    }

    fn set_capsule(&mut self, half_height: f32, radius: f32) {
        // Feet stay planted; only the centre moves
        self.capsule = CapsuleSize::new(half_height, radius);
        self.capsule_dirty = true;
    }

    fn actor_forward(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos, sin, 0.0)
    }

    fn actor_right(&self) -> Vec3 {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vec3::new(-sin, cos, 0.0)
    }

    fn view_origin(&self) -> Vec3 {
        let offset = self.config.eye_offset;
        self.center()
            + self.actor_forward() * offset.x
            + self.actor_right() * offset.y
            + Vec3::Z * offset.z
    }

    fn view_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch)
    }
}

/// Move `current` toward `target` by at most `max_delta`.
fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance < 1e-6 {
        target
    } else {
        current + delta / distance * max_delta
    }
}

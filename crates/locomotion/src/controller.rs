//! Locomotion controller.
//!
//! This is the main entry point of the crate. It reacts to input events and
//! the landing notification, updates the [`MovementProfile`], and issues
//! commands to the integrator and world passed in by the caller.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::LocomotionConfig;
use crate::gait::GaitState;
use crate::grapple::{GrappleOutcome, GrappleState};
use crate::input::{ActionValue, Dispatch, InputAction, InputBindings, LocomotionCommand, TriggerEvent};
use crate::jump::{JumpOutcome, JumpState};
use crate::motion::{EntityId, MotionIntegrator, WorldQuery};

/// Mutable movement state of one character.
///
/// Created once at spawn and kept for the character's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementProfile {
    /// Speed, capsule, jump and grapple presets.
    pub config: LocomotionConfig,

    /// Jump counter (handles double jump).
    pub jump: JumpState,

    /// Sprint/slide flags and the parameters in effect.
    pub gait: GaitState,

    /// Grapple target, present only while grappling.
    pub grapple: GrappleState,
}

impl MovementProfile {
    /// Spawn state for `config`: grounded, standing, not grappling.
    ///
    /// The config must pass [`LocomotionConfig::validate`]. `load` and
    /// `from_json_str` guarantee this; hand-built configs are checked in
    /// debug builds only.
    pub fn new(config: LocomotionConfig) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid locomotion config: {:?}",
            config.validate()
        );
        Self {
            jump: JumpState::new(config.max_jump_count),
            gait: GaitState::standing(&config),
            grapple: GrappleState::new(),
            config,
        }
    }
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

/// First-person locomotion controller.
///
/// # Example
///
/// ```ignore
/// let mut controller = LocomotionController::new(player_id, LocomotionConfig::default());
/// controller.apply_spawn_defaults(&mut body);
///
/// // On input:
/// controller.jump_pressed(&mut body);
///
/// // When the integrator reports a landing:
/// controller.on_landed();
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    profile: MovementProfile,

    /// The controlled character, excluded from its own raycasts.
    entity: EntityId,

    /// Whether a player controller is attached. Move/Look need one.
    possessed: bool,
}

impl LocomotionController {
    /// Create a possessed controller for `entity`.
    ///
    /// `config` must be valid, see [`MovementProfile::new`].
    pub fn new(entity: EntityId, config: LocomotionConfig) -> Self {
        Self {
            profile: MovementProfile::new(config),
            entity,
            possessed: true,
        }
    }

    /// Create a controller with the default configuration.
    pub fn with_default_config(entity: EntityId) -> Self {
        Self::new(entity, LocomotionConfig::default())
    }

    /// Push the standing parameter set to a freshly spawned integrator.
    pub fn apply_spawn_defaults(&self, motion: &mut impl MotionIntegrator) {
        GaitState::standing_change(&self.profile.config).apply(motion);
    }

    // ========================================================================
    // Possession
    // ========================================================================

    /// Attach a player controller; Move and Look take effect again.
    pub fn possess(&mut self) {
        self.possessed = true;
    }

    /// Detach the player controller. Move and Look become no-ops.
    pub fn unpossess(&mut self) {
        self.possessed = false;
    }

    /// Whether a player controller is attached.
    pub fn is_possessed(&self) -> bool {
        self.possessed
    }

    // ========================================================================
    // Move / Look
    // ========================================================================

    /// Forward `axis.y` along the actor forward and `axis.x` along its right.
    pub fn move_axis(&self, axis: Vec2, motion: &mut impl MotionIntegrator) {
        if !self.possessed {
            log::debug!("move ignored: no controller attached");
            return;
        }

        log::trace!("move axis {:?}", axis);
        let forward = motion.actor_forward();
        let right = motion.actor_right();
        motion.add_movement_input(forward, axis.y);
        motion.add_movement_input(right, axis.x);
    }

    /// Forward `axis.x` as yaw and `axis.y` as pitch.
    pub fn look_axis(&self, axis: Vec2, motion: &mut impl MotionIntegrator) {
        if !self.possessed {
            log::debug!("look ignored: no controller attached");
            return;
        }

        log::trace!("look axis {:?}", axis);
        motion.add_orientation_input(axis.x, axis.y);
    }

    // ========================================================================
    // Jumping
    // ========================================================================

    /// Ground jump or air jump. Refused requests have no side effects.
    pub fn jump_pressed(&mut self, motion: &mut impl MotionIntegrator) -> JumpOutcome {
        let outcome = self.profile.jump.try_jump(motion.is_falling());

        match outcome {
            JumpOutcome::Jumped(count) => {
                let impulse = Vec3::new(0.0, 0.0, self.profile.config.jump_impulse);
                motion.launch(impulse, false, true);
                log::info!("jump: count={}", count);
            }
            refused => {
                log::debug!(
                    "jump ignored: {:?} (count={})",
                    refused,
                    self.profile.jump.count()
                );
            }
        }

        outcome
    }

    /// Landing notification from the integrator.
    pub fn on_landed(&mut self) {
        log::info!("landed: count {} -> 0", self.profile.jump.count());
        self.profile.jump.land();
    }

    // ========================================================================
    // Sprint / Slide
    // ========================================================================

    /// Switch to the sprint walk speed.
    pub fn sprint_start(&mut self, motion: &mut impl MotionIntegrator) {
        log::info!("sprint start");
        self.profile.gait.start_sprint(&self.profile.config).apply(motion);
    }

    /// Return to the base walk speed.
    pub fn sprint_stop(&mut self, motion: &mut impl MotionIntegrator) {
        log::info!("sprint stop");
        self.profile.gait.stop_sprint(&self.profile.config).apply(motion);
    }

    /// Slide speed, zero friction and the reduced capsule.
    pub fn slide_start(&mut self, motion: &mut impl MotionIntegrator) {
        log::info!("slide start");
        self.profile.gait.start_slide(&self.profile.config).apply(motion);
    }

    /// Restore standing values. Runs even without a preceding slide start.
    pub fn slide_stop(&mut self, motion: &mut impl MotionIntegrator) {
        log::info!("slide stop");
        self.profile.gait.stop_slide(&self.profile.config).apply(motion);
    }

    // ========================================================================
    // Grapple
    // ========================================================================

    /// Look for a grapple target along the view direction.
    pub fn grapple_activate(
        &mut self,
        motion: &impl MotionIntegrator,
        world: &impl WorldQuery,
    ) -> GrappleOutcome {
        let outcome = self.profile.grapple.activate(
            world,
            motion.view_origin(),
            motion.view_forward(),
            self.profile.config.grapple_range,
            self.entity,
        );

        match outcome {
            GrappleOutcome::Attached(target) => log::info!("grapple attached at {:?}", target),
            GrappleOutcome::AlreadyGrappling => log::debug!("grapple ignored: already grappling"),
            GrappleOutcome::Missed => log::debug!("grapple missed"),
        }

        outcome
    }

    /// Drop the grapple target. Returns whether one was held.
    pub fn grapple_release(&mut self) -> bool {
        let released = self.profile.grapple.release();
        if released {
            log::info!("grapple released");
        }
        released
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Run a single command.
    ///
    /// Axis commands read `value` as a 2-D axis; a digital value counts as zero.
    pub fn execute<M, W>(
        &mut self,
        command: LocomotionCommand,
        value: ActionValue,
        motion: &mut M,
        world: &W,
    ) where
        M: MotionIntegrator,
        W: WorldQuery,
    {
        match command {
            LocomotionCommand::Move => self.move_axis(value.axis(), motion),
            LocomotionCommand::Look => self.look_axis(value.axis(), motion),
            LocomotionCommand::Jump => {
                self.jump_pressed(motion);
            }
            LocomotionCommand::SprintStart => self.sprint_start(motion),
            LocomotionCommand::SprintStop => self.sprint_stop(motion),
            LocomotionCommand::SlideStart => self.slide_start(motion),
            LocomotionCommand::SlideStop => self.slide_stop(motion),
            LocomotionCommand::GrappleActivate => {
                self.grapple_activate(&*motion, world);
            }
            LocomotionCommand::GrappleRelease => {
                self.grapple_release();
            }
        }
    }

    /// Resolve an input event through `bindings` and run the bound command.
    pub fn dispatch<M, W>(
        &mut self,
        bindings: &InputBindings,
        action: InputAction,
        trigger: TriggerEvent,
        value: ActionValue,
        motion: &mut M,
        world: &W,
    ) -> Dispatch
    where
        M: MotionIntegrator,
        W: WorldQuery,
    {
        match bindings.resolve(action, trigger) {
            Some(command) => {
                self.execute(command, value, motion, world);
                Dispatch::Handled(command)
            }
            None => {
                log::debug!("no binding for {:?}/{:?}", action, trigger);
                Dispatch::Unbound
            }
        }
    }

    // ========================================================================
    // State queries
    // ========================================================================

    /// The full movement state.
    pub fn profile(&self) -> &MovementProfile {
        &self.profile
    }

    /// Jumps performed since the last landing.
    pub fn jump_count(&self) -> u32 {
        self.profile.jump.count()
    }

    /// Sprint held, including while sliding.
    pub fn is_sprinting(&self) -> bool {
        self.profile.gait.is_sprinting
    }

    /// Slide held.
    pub fn is_sliding(&self) -> bool {
        self.profile.gait.is_sliding
    }

    /// Whether a grapple target is held.
    pub fn is_grappling(&self) -> bool {
        self.profile.grapple.is_grappling()
    }

    /// Point acquired by the last successful grapple, while grappling.
    pub fn grapple_target(&self) -> Option<Vec3> {
        self.profile.grapple.target()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapsuleSize;
    use crate::testing::{Call, RecordingIntegrator, ScriptedWorld};

    const PLAYER: EntityId = 1;

    fn controller() -> LocomotionController {
        LocomotionController::with_default_config(PLAYER)
    }

    // =========================================================================
    // Jump
    // =========================================================================

    #[test]
    fn test_ground_jump_launches_upward() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        let outcome = ctrl.jump_pressed(&mut motion);

        assert_eq!(outcome, JumpOutcome::Jumped(1));
        assert_eq!(ctrl.jump_count(), 1);
        assert_eq!(
            motion.calls,
            vec![Call::Launch(Vec3::new(0.0, 0.0, 600.0), false, true)]
        );
    }

    #[test]
    fn test_air_jump_while_falling() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();
        ctrl.jump_pressed(&mut motion);

        motion.falling = true;
        let outcome = ctrl.jump_pressed(&mut motion);

        assert_eq!(outcome, JumpOutcome::Jumped(2));
        assert_eq!(ctrl.jump_count(), 2);
        assert_eq!(motion.launches().len(), 2);
    }

    #[test]
    fn test_third_jump_touches_nothing() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();
        ctrl.jump_pressed(&mut motion);
        motion.falling = true;
        ctrl.jump_pressed(&mut motion);
        let calls_before = motion.calls.len();

        let outcome = ctrl.jump_pressed(&mut motion);

        assert_eq!(outcome, JumpOutcome::Exhausted);
        assert_eq!(ctrl.jump_count(), 2);
        assert_eq!(motion.calls.len(), calls_before);
    }

    #[test]
    fn test_second_press_before_leaving_ground_ignored() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();
        ctrl.jump_pressed(&mut motion);

        // Integrator still reports grounded
        let outcome = ctrl.jump_pressed(&mut motion);

        assert_eq!(outcome, JumpOutcome::NotAirborne);
        assert_eq!(ctrl.jump_count(), 1);
        assert_eq!(motion.launches().len(), 1);
    }

    #[test]
    fn test_landing_restores_both_jumps() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();
        ctrl.jump_pressed(&mut motion);
        motion.falling = true;
        ctrl.jump_pressed(&mut motion);

        ctrl.on_landed();
        motion.falling = false;
        assert_eq!(ctrl.jump_count(), 0);

        assert!(ctrl.jump_pressed(&mut motion).jumped());
        motion.falling = true;
        assert!(ctrl.jump_pressed(&mut motion).jumped());
        assert_eq!(motion.launches().len(), 4);
    }

    #[test]
    fn test_landing_without_jump() {
        let mut ctrl = controller();
        ctrl.on_landed();
        assert_eq!(ctrl.jump_count(), 0);
    }

    #[test]
    fn test_jump_allowance_follows_config() {
        let mut ctrl = LocomotionController::new(PLAYER, LocomotionConfig::arcade());
        let mut motion = RecordingIntegrator::default();

        assert!(ctrl.jump_pressed(&mut motion).jumped());
        motion.falling = true;
        assert!(ctrl.jump_pressed(&mut motion).jumped());
        assert_eq!(ctrl.jump_pressed(&mut motion), JumpOutcome::Jumped(3));
        assert_eq!(ctrl.jump_pressed(&mut motion), JumpOutcome::Exhausted);
        assert_eq!(motion.launches(), vec![Vec3::new(0.0, 0.0, 700.0); 3]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid locomotion config")]
    fn test_zero_jump_config_rejected() {
        let config = LocomotionConfig {
            max_jump_count: 0,
            ..Default::default()
        };
        LocomotionController::new(PLAYER, config);
    }

    #[test]
    fn test_profile_reload_rejects_bad_jump_count() {
        let mut value = serde_json::to_value(MovementProfile::default()).unwrap();
        let reloaded: MovementProfile = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(reloaded, MovementProfile::default());

        value["jump"]["count"] = serde_json::json!(5);
        assert!(serde_json::from_value::<MovementProfile>(value).is_err());
    }

    // =========================================================================
    // Sprint / Slide
    // =========================================================================

    #[test]
    fn test_sprint_speeds() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.sprint_start(&mut motion);
        assert_eq!(motion.max_walk_speed, 1800.0);
        assert!(ctrl.is_sprinting());

        ctrl.sprint_stop(&mut motion);
        assert_eq!(motion.max_walk_speed, 1200.0);
        assert!(!ctrl.is_sprinting());
    }

    #[test]
    fn test_sprint_stop_without_start() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator {
            max_walk_speed: 333.0,
            ..Default::default()
        };

        ctrl.sprint_stop(&mut motion);
        assert_eq!(motion.max_walk_speed, 1200.0);
    }

    #[test]
    fn test_slide_parameters() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.slide_start(&mut motion);
        assert_eq!(motion.max_walk_speed, 800.0);
        assert_eq!(motion.braking_friction, 0.0);
        assert_eq!(motion.capsule, (48.0, 30.0));
        assert!(ctrl.is_sliding());

        ctrl.slide_stop(&mut motion);
        assert_eq!(motion.max_walk_speed, 1200.0);
        assert_eq!(motion.braking_friction, 2.0);
        assert_eq!(motion.capsule, (96.0, 55.0));
        assert!(!ctrl.is_sliding());
    }

    #[test]
    fn test_slide_stop_without_start_forces_standing() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator {
            max_walk_speed: 1.0,
            braking_friction: 9.0,
            capsule: (10.0, 5.0),
            ..Default::default()
        };

        ctrl.slide_stop(&mut motion);

        assert_eq!(motion.max_walk_speed, 1200.0);
        assert_eq!(motion.braking_friction, 2.0);
        assert_eq!(motion.capsule, (96.0, 55.0));
    }

    #[test]
    fn test_slide_round_trip_matches_spawn_state() {
        let mut ctrl = controller();
        let before = ctrl.profile().clone();
        let mut motion = RecordingIntegrator::default();

        ctrl.slide_start(&mut motion);
        ctrl.slide_stop(&mut motion);

        assert_eq!(ctrl.profile(), &before);
        assert_eq!(ctrl.profile().gait.capsule, CapsuleSize::STANDING);
    }

    #[test]
    fn test_slide_during_sprint_drops_to_base_speed() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.sprint_start(&mut motion);
        ctrl.slide_start(&mut motion);
        assert_eq!(motion.max_walk_speed, 800.0);

        ctrl.slide_stop(&mut motion);
        assert_eq!(motion.max_walk_speed, 1200.0);
        assert!(ctrl.is_sprinting());
    }

    #[test]
    fn test_sprint_and_slide_do_not_touch_jump_or_grapple() {
        let mut ctrl = controller();
        let mut motion = RecordingIntegrator::default();
        ctrl.jump_pressed(&mut motion);

        ctrl.sprint_start(&mut motion);
        ctrl.slide_start(&mut motion);

        assert_eq!(ctrl.jump_count(), 1);
        assert!(!ctrl.is_grappling());
    }

    #[test]
    fn test_spawn_defaults_push_standing_set() {
        let ctrl = controller();
        let mut motion = RecordingIntegrator {
            max_walk_speed: 0.0,
            braking_friction: 0.0,
            capsule: (0.0, 0.0),
            ..Default::default()
        };

        ctrl.apply_spawn_defaults(&mut motion);

        assert_eq!(motion.max_walk_speed, 1200.0);
        assert_eq!(motion.braking_friction, 2.0);
        assert_eq!(motion.capsule, (96.0, 55.0));
    }

    // =========================================================================
    // Grapple
    // =========================================================================

    #[test]
    fn test_grapple_hit_and_release() {
        let mut ctrl = controller();
        let motion = RecordingIntegrator {
            eye: Vec3::new(0.0, 0.0, 60.0),
            ..Default::default()
        };
        let world = ScriptedWorld::wall_at_x(500.0);

        let outcome = ctrl.grapple_activate(&motion, &world);

        let target = Vec3::new(500.0, 0.0, 60.0);
        assert_eq!(outcome, GrappleOutcome::Attached(target));
        assert!(ctrl.is_grappling());
        assert_eq!(ctrl.grapple_target(), Some(target));
        assert_eq!(world.last_ignore(), Some(PLAYER));

        assert!(ctrl.grapple_release());
        assert!(!ctrl.is_grappling());
        assert!(ctrl.grapple_target().is_none());
    }

    #[test]
    fn test_grapple_while_grappling_makes_no_query() {
        let mut ctrl = controller();
        let motion = RecordingIntegrator::default();
        let world = ScriptedWorld::wall_at_x(500.0);
        ctrl.grapple_activate(&motion, &world);
        let target = ctrl.grapple_target();

        let outcome = ctrl.grapple_activate(&motion, &world);

        assert_eq!(outcome, GrappleOutcome::AlreadyGrappling);
        assert_eq!(world.query_count(), 1);
        assert_eq!(ctrl.grapple_target(), target);
    }

    #[test]
    fn test_grapple_out_of_range() {
        let mut ctrl = controller();
        let motion = RecordingIntegrator::default();
        let world = ScriptedWorld::wall_at_x(1200.0);

        let outcome = ctrl.grapple_activate(&motion, &world);

        assert_eq!(outcome, GrappleOutcome::Missed);
        assert!(!ctrl.is_grappling());
        assert!(ctrl.grapple_target().is_none());
    }

    #[test]
    fn test_grapple_leaves_integrator_alone() {
        let mut ctrl = controller();
        let motion = RecordingIntegrator::default();
        let world = ScriptedWorld::wall_at_x(500.0);

        ctrl.grapple_activate(&motion, &world);
        ctrl.grapple_release();

        assert!(motion.calls.is_empty());
    }

    // =========================================================================
    // Move / Look
    // =========================================================================

    #[test]
    fn test_move_forwards_both_axes() {
        let ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.move_axis(Vec2::new(0.25, -1.0), &mut motion);

        assert_eq!(
            motion.calls,
            vec![
                Call::MovementInput(Vec3::X, -1.0),
                Call::MovementInput(Vec3::Y, 0.25),
            ]
        );
    }

    #[test]
    fn test_move_zero_axis_still_forwards() {
        let ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.move_axis(Vec2::ZERO, &mut motion);
        assert_eq!(motion.calls.len(), 2);
    }

    #[test]
    fn test_look_forwards_yaw_and_pitch() {
        let ctrl = controller();
        let mut motion = RecordingIntegrator::default();

        ctrl.look_axis(Vec2::new(0.5, -0.2), &mut motion);

        assert_eq!(motion.calls, vec![Call::OrientationInput(0.5, -0.2)]);
    }

    #[test]
    fn test_unpossessed_move_and_look_are_noops() {
        let mut ctrl = controller();
        ctrl.unpossess();
        let mut motion = RecordingIntegrator::default();

        ctrl.move_axis(Vec2::ONE, &mut motion);
        ctrl.look_axis(Vec2::ONE, &mut motion);
        assert!(motion.calls.is_empty());

        // Other actions keep working without a controller
        assert!(ctrl.jump_pressed(&mut motion).jumped());

        ctrl.possess();
        ctrl.move_axis(Vec2::ONE, &mut motion);
        assert_eq!(motion.calls.len(), 3);
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    #[test]
    fn test_dispatch_standard_bindings() {
        let mut ctrl = controller();
        let bindings = InputBindings::standard();
        let mut motion = RecordingIntegrator::default();
        let world = ScriptedWorld::wall_at_x(500.0);

        let result = ctrl.dispatch(
            &bindings,
            InputAction::Jump,
            TriggerEvent::Started,
            ActionValue::Digital,
            &mut motion,
            &world,
        );
        assert_eq!(result, Dispatch::Handled(LocomotionCommand::Jump));
        assert_eq!(ctrl.jump_count(), 1);

        ctrl.dispatch(
            &bindings,
            InputAction::Sprint,
            TriggerEvent::Started,
            ActionValue::Digital,
            &mut motion,
            &world,
        );
        assert_eq!(motion.max_walk_speed, 1800.0);

        ctrl.dispatch(
            &bindings,
            InputAction::Grapple,
            TriggerEvent::Started,
            ActionValue::Digital,
            &mut motion,
            &world,
        );
        assert!(ctrl.is_grappling());

        ctrl.dispatch(
            &bindings,
            InputAction::Grapple,
            TriggerEvent::Completed,
            ActionValue::Digital,
            &mut motion,
            &world,
        );
        assert!(!ctrl.is_grappling());
    }

    #[test]
    fn test_dispatch_unbound_does_nothing() {
        let mut ctrl = controller();
        let bindings = InputBindings::standard();
        let mut motion = RecordingIntegrator::default();
        let world = ScriptedWorld::empty();

        // Jump is bound on Started only
        let result = ctrl.dispatch(
            &bindings,
            InputAction::Jump,
            TriggerEvent::Completed,
            ActionValue::Digital,
            &mut motion,
            &world,
        );

        assert_eq!(result, Dispatch::Unbound);
        assert_eq!(ctrl.jump_count(), 0);
        assert!(motion.calls.is_empty());
    }

    #[test]
    fn test_dispatch_move_with_digital_value_reads_zero() {
        let mut ctrl = controller();
        let bindings = InputBindings::standard();
        let mut motion = RecordingIntegrator::default();
        let world = ScriptedWorld::empty();

        ctrl.dispatch(
            &bindings,
            InputAction::Move,
            TriggerEvent::Triggered,
            ActionValue::Digital,
            &mut motion,
            &world,
        );

        assert_eq!(
            motion.calls,
            vec![
                Call::MovementInput(Vec3::X, 0.0),
                Call::MovementInput(Vec3::Y, 0.0),
            ]
        );
    }
}

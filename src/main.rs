//! fpsmove - Locomotion Demo
//!
//! Spawns a character in a small test level and replays a scripted input
//! timeline through the locomotion controller: walk, double jump, sprint,
//! slide and grapple.

use std::path::PathBuf;

use clap::Parser;
use fpsmove_locomotion::{
    ActionValue, Dispatch, EntityId, InputAction, InputBindings, LocomotionConfig,
    LocomotionController, TriggerEvent,
};
use fpsmove_physics::{BodyConfig, CharacterBody, CollisionWorld, ContentFlags};
use glam::{Vec2, Vec3};

const PLAYER: EntityId = 1;

#[derive(Parser)]
#[command(version, about = "Replays a scripted locomotion timeline against a test level")]
struct Cli {
    /// JSON locomotion config. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 240)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

/// One input event at a given frame.
struct ScriptedInput {
    frame: u32,
    action: InputAction,
    trigger: TriggerEvent,
    value: ActionValue,
}

impl ScriptedInput {
    const fn press(frame: u32, action: InputAction) -> Self {
        Self {
            frame,
            action,
            trigger: TriggerEvent::Started,
            value: ActionValue::Digital,
        }
    }

    const fn release(frame: u32, action: InputAction) -> Self {
        Self {
            frame,
            action,
            trigger: TriggerEvent::Completed,
            value: ActionValue::Digital,
        }
    }

    const fn axis(frame: u32, action: InputAction, axis: Vec2) -> Self {
        Self {
            frame,
            action,
            trigger: TriggerEvent::Triggered,
            value: ActionValue::Axis2D(axis),
        }
    }
}

/// Strafe right for the given frames.
fn strafe(frames: std::ops::Range<u32>) -> impl Iterator<Item = ScriptedInput> {
    frames.map(|frame| ScriptedInput::axis(frame, InputAction::Move, Vec2::new(1.0, 0.0)))
}

/// Walk along the wall, double jump (third press is refused), land, sprint
/// into a slide, then face the wall and grapple it.
fn timeline() -> Vec<ScriptedInput> {
    let mut events: Vec<ScriptedInput> = strafe(0..30).collect();
    events.extend([
        ScriptedInput::press(10, InputAction::Jump),
        ScriptedInput::press(20, InputAction::Jump),
        ScriptedInput::press(25, InputAction::Jump),
        ScriptedInput::press(120, InputAction::Sprint),
    ]);
    events.extend(strafe(120..160));
    events.extend([
        ScriptedInput::press(140, InputAction::Slide),
        ScriptedInput::release(170, InputAction::Slide),
        ScriptedInput::release(175, InputAction::Sprint),
        ScriptedInput::axis(190, InputAction::Look, Vec2::new(0.0, 5.0)),
        ScriptedInput::press(200, InputAction::Grapple),
        ScriptedInput::release(220, InputAction::Grapple),
    ]);
    events.sort_by_key(|event| event.frame);
    events
}

/// Floor with its top at z=0 and a wall 500 units ahead of the spawn.
fn build_level() -> CollisionWorld {
    let mut world = CollisionWorld::new();
    world.add_box(
        Vec3::new(0.0, 0.0, -50.0),
        Vec3::new(5000.0, 5000.0, 50.0),
        ContentFlags::SOLID,
    );
    world.add_box(
        Vec3::new(550.0, 0.0, 200.0),
        Vec3::new(50.0, 5000.0, 200.0),
        ContentFlags::SOLID,
    );
    world
}

fn load_config(path: Option<&PathBuf>) -> Result<LocomotionConfig, fpsmove_locomotion::ConfigError> {
    match path {
        Some(path) => LocomotionConfig::load(path),
        None => Ok(LocomotionConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    let mut world = build_level();
    let mut body = CharacterBody::spawn(PLAYER, Vec3::ZERO, BodyConfig::default(), &mut world);
    let mut controller = LocomotionController::new(PLAYER, config);
    controller.apply_spawn_defaults(&mut body);
    let bindings = InputBindings::standard();

    let events = timeline();
    let mut next_event = 0;
    let mut landings = 0u32;

    for frame in 0..cli.frames {
        while let Some(event) = events.get(next_event).filter(|event| event.frame == frame) {
            let result = controller.dispatch(
                &bindings,
                event.action,
                event.trigger,
                event.value,
                &mut body,
                &world,
            );
            if result == Dispatch::Unbound {
                log::warn!("frame {}: {:?}/{:?} is unbound", frame, event.action, event.trigger);
            }
            next_event += 1;
        }

        let report = body.step(cli.dt, &mut world);
        if report.landed {
            landings += 1;
            controller.on_landed();
        }

        log::trace!(
            "frame {}: pos={:?} vel={:?} grounded={}",
            frame,
            body.position(),
            body.velocity(),
            report.grounded
        );
    }

    log::info!(
        "done after {} frames: position={:?} speed={:.1} grounded={} landings={}",
        cli.frames,
        body.position(),
        body.horizontal_speed(),
        body.is_grounded(),
        landings
    );
    log::info!(
        "jump_count={} sprinting={} sliding={} grappling={}",
        controller.jump_count(),
        controller.is_sprinting(),
        controller.is_sliding(),
        controller.is_grappling()
    );

    Ok(())
}

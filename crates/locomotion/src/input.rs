//! Input action bindings.
//!
//! Maps an input action plus its trigger phase to a locomotion command.
//! The table is built once at startup and consulted for every input event.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Logical input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Move,
    Look,
    Jump,
    Sprint,
    Slide,
    Grapple,
}

/// Phase of an input action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    /// Pressed this frame.
    Started,
    /// Held / axis active.
    Triggered,
    /// Released this frame.
    Completed,
}

/// Value carried by an input event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ActionValue {
    /// Button with no payload.
    #[default]
    Digital,
    /// 2-D axis (x = right / yaw, y = forward / pitch).
    Axis2D(Vec2),
}

impl ActionValue {
    /// The axis payload, or zero for a digital value.
    pub fn axis(self) -> Vec2 {
        match self {
            Self::Axis2D(axis) => axis,
            Self::Digital => Vec2::ZERO,
        }
    }
}

/// Controller operation an input event can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionCommand {
    Move,
    Look,
    Jump,
    SprintStart,
    SprintStop,
    SlideStart,
    SlideStop,
    GrappleActivate,
    GrappleRelease,
}

/// Result of dispatching an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The bound command ran.
    Handled(LocomotionCommand),
    /// Nothing is bound to this action/trigger pair.
    Unbound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("{action:?}/{trigger:?} is already bound to {existing:?}")]
    AlreadyBound {
        action: InputAction,
        trigger: TriggerEvent,
        existing: LocomotionCommand,
    },
}

/// Dispatch table from `(action, trigger)` to command.
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    table: HashMap<(InputAction, TriggerEvent), LocomotionCommand>,
}

impl InputBindings {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard first-person layout.
    ///
    /// Move and Look fire while triggered. Jump fires on press. Sprint, slide
    /// and grapple start on press and stop on release.
    pub fn standard() -> Self {
        use InputAction as A;
        use LocomotionCommand as C;
        use TriggerEvent as T;

        let entries = [
            (A::Move, T::Triggered, C::Move),
            (A::Look, T::Triggered, C::Look),
            (A::Jump, T::Started, C::Jump),
            (A::Sprint, T::Started, C::SprintStart),
            (A::Sprint, T::Completed, C::SprintStop),
            (A::Slide, T::Started, C::SlideStart),
            (A::Slide, T::Completed, C::SlideStop),
            (A::Grapple, T::Started, C::GrappleActivate),
            (A::Grapple, T::Completed, C::GrappleRelease),
        ];

        Self {
            table: entries
                .into_iter()
                .map(|(action, trigger, command)| ((action, trigger), command))
                .collect(),
        }
    }

    /// Bind a command. Each pair may be bound only once.
    pub fn bind(
        &mut self,
        action: InputAction,
        trigger: TriggerEvent,
        command: LocomotionCommand,
    ) -> Result<(), BindingError> {
        if let Some(&existing) = self.table.get(&(action, trigger)) {
            return Err(BindingError::AlreadyBound {
                action,
                trigger,
                existing,
            });
        }
        self.table.insert((action, trigger), command);
        Ok(())
    }

    /// Remove a binding, returning the command it held.
    pub fn unbind(&mut self, action: InputAction, trigger: TriggerEvent) -> Option<LocomotionCommand> {
        self.table.remove(&(action, trigger))
    }

    /// Look up the command for an event.
    #[inline]
    pub fn resolve(&self, action: InputAction, trigger: TriggerEvent) -> Option<LocomotionCommand> {
        self.table.get(&(action, trigger)).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

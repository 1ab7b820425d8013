//! Jump and double-jump arbitration.
//!
//! One jump is always available from the ground. Further jumps are only
//! granted while the integrator reports the character as falling, up to the
//! configured maximum. Landing restores the full allowance.
//!
//! ```text
//! Grounded(0) --jump--> Airborne(1) --jump, falling--> Airborne(2) --jump--> blocked
//! Airborne(*) --land--> Grounded(0)
//! ```

use serde::{Deserialize, Serialize};

/// Default number of jumps between landings (one ground jump, one air jump).
pub const DEFAULT_MAX_JUMP_COUNT: u32 = 2;

/// Result of a jump request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The jump was granted; holds the jump count after the jump.
    Jumped(u32),
    /// Every jump has been used since the last landing.
    Exhausted,
    /// Not the first jump, and the character is not falling.
    NotAirborne,
}

impl JumpOutcome {
    /// Whether a launch should be issued.
    #[inline]
    pub fn jumped(self) -> bool {
        matches!(self, Self::Jumped(_))
    }
}

/// Jump counter state machine.
///
/// Invariant: `0 <= count <= max_count`. Deserialization rejects values
/// that break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawJumpState")]
pub struct JumpState {
    /// Jumps performed since the last landing.
    count: u32,

    /// Jumps allowed between landings.
    max_count: u32,
}

/// Unchecked wire form of [`JumpState`].
#[derive(Deserialize)]
struct RawJumpState {
    count: u32,
    max_count: u32,
}

impl TryFrom<RawJumpState> for JumpState {
    type Error = String;

    fn try_from(raw: RawJumpState) -> Result<Self, Self::Error> {
        if raw.count > raw.max_count {
            return Err(format!(
                "jump count {} exceeds max {}",
                raw.count, raw.max_count
            ));
        }
        Ok(Self {
            count: raw.count,
            max_count: raw.max_count,
        })
    }
}

impl Default for JumpState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_JUMP_COUNT)
    }
}

impl JumpState {
    /// Create a grounded jump state allowing `max_count` jumps per landing.
    pub fn new(max_count: u32) -> Self {
        Self {
            count: 0,
            max_count,
        }
    }

    /// Request a jump.
    ///
    /// Granted when jumps remain and either none has been used yet or the
    /// character is falling. A refused request leaves the state untouched.
    pub fn try_jump(&mut self, is_falling: bool) -> JumpOutcome {
        if self.count >= self.max_count {
            return JumpOutcome::Exhausted;
        }
        if self.count != 0 && !is_falling {
            return JumpOutcome::NotAirborne;
        }

        self.count += 1;
        JumpOutcome::Jumped(self.count)
    }

    /// Reset the counter after touching ground.
    pub fn land(&mut self) {
        self.count = 0;
    }

    /// Jumps performed since the last landing.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Jumps allowed between landings.
    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Jumps still available before landing.
    pub fn remaining(&self) -> u32 {
        self.max_count.saturating_sub(self.count)
    }
}

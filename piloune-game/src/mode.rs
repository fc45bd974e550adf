//! Ronron mode state machine.
//!
//! Ronron is the degraded mode: while active, every action must be repeated
//! [`RONRON_REQUIRED_PRESSES`] times before its effect applies. Entry and
//! exit use asymmetric thresholds so the mode does not flicker across a
//! single boundary value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actions::ActionId;
use crate::state::PetState;

/// Any stat strictly below this value pulls Piloune into ronron mode.
pub const RONRON_ENTER_THRESHOLD: i32 = 20;
/// All stats must reach this value before Piloune leaves ronron mode.
pub const RONRON_EXIT_THRESHOLD: i32 = 40;
/// Presses of the same action required for it to land while ronron.
pub const RONRON_REQUIRED_PRESSES: u8 = 3;

pub const MSG_RONRON_ENTER: &str = "Je suis ronron... 😾 Il faut faire les actions 3 fois !";
pub const MSG_RONRON_EXIT: &str = "Je ne suis plus ronron ! Merci ! 😊";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Ronron,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ronron => "ronron",
        }
    }

    #[must_use]
    pub const fn is_ronron(self) -> bool {
        matches!(self, Self::Ronron)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repetition progress on one action while ronron. `count` never reaches
/// [`RONRON_REQUIRED_PRESSES`]: the completing press applies the action and
/// clears the pending entry instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub action: ActionId,
    pub count: u8,
}

/// Enter check, run after decay mutations. Returns whether the mode flipped.
pub fn check_enter(state: &mut PetState) -> bool {
    if state.mode.is_ronron() || !state.stats.any_below(RONRON_ENTER_THRESHOLD) {
        return false;
    }
    force_enter(state);
    state.message = MSG_RONRON_ENTER.to_string();
    log::info!("ronron mode entered");
    true
}

/// Exit check, run after a successful action completion only — never on
/// decay and never mid-repetition. Returns whether the mode flipped.
pub fn check_exit(state: &mut PetState) -> bool {
    if !state.mode.is_ronron() || !state.stats.all_at_least(RONRON_EXIT_THRESHOLD) {
        return false;
    }
    state.mode = Mode::Normal;
    state.pending = None;
    state.message = MSG_RONRON_EXIT.to_string();
    log::info!("ronron mode exited");
    true
}

/// Unconditionally switch into ronron, as the zero-all rare events and the
/// debug override do. The caller owns the message.
pub(crate) fn force_enter(state: &mut PetState) {
    state.mode = Mode::Ronron;
    state.ronron_unlocked = true;
    state.pending = None;
}

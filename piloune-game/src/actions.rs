//! The action engine.
//!
//! Every action is a data-table entry: a delta recipe, a flavor message and
//! an optional rare event. `perform` is the single code path that resolves
//! them, so the rare-event and repetition rules live in exactly one place.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::mode::{self, Mode, PendingAction, RONRON_REQUIRED_PRESSES};
use crate::state::PetState;
use crate::stats::Stat;

const MSG_SUGAR: &str = "Mmmh délicieux ! 🍭";
const MSG_IRIS: &str = "Que ces iris sont belles ! 🌸";
const MSG_TWITCH: &str = "Ah, du bon stream ! 📺";
const MSG_NAP: &str = "Ma pétée me fait du bien ! 😴💨";
const MSG_SLEEP: &str = "Quel bon sommeil ! 😴💤";
const MSG_COFFEE: &str = "Ça réveille ! ☕";
const MSG_HUG: &str = "J'adore les câlins ! 💕";
const MSG_COCO_POPS: &str = "Coco Pops pour être propre ! 🥣";
const MSG_INVENT_TDAH: &str = "Quelle créativité ! 🧠✨";
const MSG_FEELINGS: &str = "Ça fait du bien de parler ! 💭";
const MSG_SHOWER: &str = "Toute propre ! ✨";
const MSG_SPA: &str = "Que du bonheur au spa ! 🧖‍♀️✨";

const MSG_RARE_SLEEP: &str = "Daniel vous réveille après 3h de sommeil ! Tout à zéro ! 😾";
const MSG_RARE_COCO_POPS: &str = "À téco ! 🌟";
const MSG_RARE_PSYCHE: &str = "Daniel se barre ! 🏃‍♂️";
const MSG_RARE_SHOWER: &str = "Toutes mes barres sont à zéro ! Je suis ronron ! 😾";
const MSG_RARE_SPA: &str = "Eau dans l'oreille au spa ! Toutes mes barres sont à zéro ! Je suis ronron ! 😾";

/// The closed set of actions. An unknown action is unrepresentable here;
/// parsing player input into an `ActionId` is the only fallible lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionId {
    Sugar,
    Iris,
    Twitch,
    Nap,
    Sleep,
    Coffee,
    Hug,
    CocoPops,
    InventTdah,
    Feelings,
    Shower,
    Spa,
}

impl ActionId {
    pub const ALL: [ActionId; 12] = [
        ActionId::Sugar,
        ActionId::Iris,
        ActionId::Twitch,
        ActionId::Nap,
        ActionId::Sleep,
        ActionId::Coffee,
        ActionId::Hug,
        ActionId::CocoPops,
        ActionId::InventTdah,
        ActionId::Feelings,
        ActionId::Shower,
        ActionId::Spa,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sugar => "sugar",
            Self::Iris => "iris",
            Self::Twitch => "twitch",
            Self::Nap => "nap",
            Self::Sleep => "sleep",
            Self::Coffee => "coffee",
            Self::Hug => "hug",
            Self::CocoPops => "coco-pops",
            Self::InventTdah => "invent-tdah",
            Self::Feelings => "feelings",
            Self::Shower => "shower",
            Self::Spa => "spa",
        }
    }

    /// Player-facing label, also used in repetition progress messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sugar => "Miam sucré",
            Self::Iris => "Iris",
            Self::Twitch => "Twitch",
            Self::Nap => "Pétée",
            Self::Sleep => "Dormir 15h",
            Self::Coffee => "Café",
            Self::Hug => "Câlin",
            Self::CocoPops => "Coco Pops",
            Self::InventTdah => "Inventer TDAH",
            Self::Feelings => "Tu ressens quoi ?",
            Self::Shower => "Douche",
            Self::Spa => "Spa",
        }
    }

    #[must_use]
    pub fn spec(self) -> &'static ActionSpec {
        match self {
            Self::Sugar => &SUGAR,
            Self::Iris => &IRIS,
            Self::Twitch => &TWITCH,
            Self::Nap => &NAP,
            Self::Sleep => &SLEEP,
            Self::Coffee => &COFFEE,
            Self::Hug => &HUG,
            Self::CocoPops => &COCO_POPS,
            Self::InventTdah => &INVENT_TDAH,
            Self::Feelings => &FEELINGS,
            Self::Shower => &SHOWER,
            Self::Spa => &SPA,
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // "feed" is the historical shortcut alias for the sugar action.
            "sugar" | "feed" => Ok(Self::Sugar),
            "iris" => Ok(Self::Iris),
            "twitch" => Ok(Self::Twitch),
            "nap" => Ok(Self::Nap),
            "sleep" => Ok(Self::Sleep),
            "coffee" => Ok(Self::Coffee),
            "hug" => Ok(Self::Hug),
            "coco-pops" => Ok(Self::CocoPops),
            "invent-tdah" => Ok(Self::InventTdah),
            "feelings" => Ok(Self::Feelings),
            "shower" => Ok(Self::Shower),
            "spa" => Ok(Self::Spa),
            _ => Err(()),
        }
    }
}

/// Override applied when a rare event fires, in place of the normal deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RareEffect {
    /// Every stat to zero, ronron mode forced.
    ZeroAll,
    /// Happiness, vitality, rest and psyche to 100; cleanliness untouched.
    AllButCleanlinessMax,
    /// Psyche to 100.
    PsycheMax,
}

/// A low-probability alternate outcome. Rare events bypass repetition
/// gating and the normal delta recipe, and always resolve on the first
/// press regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RareEvent {
    pub chance: f32,
    pub effect: RareEffect,
    pub message: &'static str,
}

/// Static per-action recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSpec {
    pub deltas: &'static [(Stat, i32)],
    pub success_message: &'static str,
    pub rare: Option<RareEvent>,
}

const SUGAR: ActionSpec = ActionSpec {
    deltas: &[(Stat::Vitality, 25)],
    success_message: MSG_SUGAR,
    rare: None,
};

const IRIS: ActionSpec = ActionSpec {
    deltas: &[(Stat::Happiness, 20)],
    success_message: MSG_IRIS,
    rare: None,
};

const TWITCH: ActionSpec = ActionSpec {
    deltas: &[(Stat::Happiness, 15)],
    success_message: MSG_TWITCH,
    rare: None,
};

const NAP: ActionSpec = ActionSpec {
    deltas: &[(Stat::Rest, 30), (Stat::Happiness, 10)],
    success_message: MSG_NAP,
    rare: None,
};

const SLEEP: ActionSpec = ActionSpec {
    deltas: &[(Stat::Rest, 50)],
    success_message: MSG_SLEEP,
    rare: Some(RareEvent {
        chance: 0.10,
        effect: RareEffect::ZeroAll,
        message: MSG_RARE_SLEEP,
    }),
};

const COFFEE: ActionSpec = ActionSpec {
    deltas: &[(Stat::Vitality, 35)],
    success_message: MSG_COFFEE,
    rare: None,
};

const HUG: ActionSpec = ActionSpec {
    deltas: &[(Stat::Happiness, 10), (Stat::Rest, 15)],
    success_message: MSG_HUG,
    rare: None,
};

const COCO_POPS: ActionSpec = ActionSpec {
    deltas: &[(Stat::Cleanliness, 20)],
    success_message: MSG_COCO_POPS,
    rare: Some(RareEvent {
        chance: 0.10,
        effect: RareEffect::AllButCleanlinessMax,
        message: MSG_RARE_COCO_POPS,
    }),
};

const INVENT_TDAH: ActionSpec = ActionSpec {
    deltas: &[(Stat::Psyche, 30)],
    success_message: MSG_INVENT_TDAH,
    rare: Some(RareEvent {
        chance: 0.10,
        effect: RareEffect::PsycheMax,
        message: MSG_RARE_PSYCHE,
    }),
};

const FEELINGS: ActionSpec = ActionSpec {
    deltas: &[(Stat::Psyche, 25)],
    success_message: MSG_FEELINGS,
    rare: Some(RareEvent {
        chance: 0.10,
        effect: RareEffect::PsycheMax,
        message: MSG_RARE_PSYCHE,
    }),
};

const SHOWER: ActionSpec = ActionSpec {
    deltas: &[(Stat::Happiness, 8), (Stat::Cleanliness, 30)],
    success_message: MSG_SHOWER,
    rare: Some(RareEvent {
        chance: 0.10,
        effect: RareEffect::ZeroAll,
        message: MSG_RARE_SHOWER,
    }),
};

const SPA: ActionSpec = ActionSpec {
    deltas: &[
        (Stat::Happiness, 25),
        (Stat::Vitality, 25),
        (Stat::Rest, 25),
        (Stat::Cleanliness, 25),
        (Stat::Psyche, 25),
    ],
    success_message: MSG_SPA,
    rare: Some(RareEvent {
        chance: 0.20,
        effect: RareEffect::ZeroAll,
        message: MSG_RARE_SPA,
    }),
};

/// What one `perform` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Deltas landed: immediately in normal mode, or on the completing
    /// press while ronron.
    Applied { exited_ronron: bool },
    /// Repetition in progress while ronron; nothing applied yet.
    Progress { count: u8 },
    /// A rare event overrode the normal path.
    Rare { effect: RareEffect },
}

/// Resolve one action press against the current state.
pub fn perform(state: &mut PetState, action: ActionId) -> ActionOutcome {
    let spec = action.spec();
    log::debug!("action {action} pressed in {} mode", state.mode);

    if let Some(rare) = spec.rare
        && roll(state, rare.chance)
    {
        apply_rare_effect(state, rare.effect);
        state.pending = None;
        state.message = rare.message.to_string();
        log::info!("rare event on {action}: {:?}", rare.effect);
        return ActionOutcome::Rare {
            effect: rare.effect,
        };
    }

    match state.mode {
        Mode::Normal => {
            state.stats.apply_all(spec.deltas);
            state.message = spec.success_message.to_string();
            ActionOutcome::Applied {
                exited_ronron: false,
            }
        }
        Mode::Ronron => {
            let count = match state.pending {
                Some(pending) if pending.action == action => pending.count + 1,
                _ => 1,
            };
            if count >= RONRON_REQUIRED_PRESSES {
                state.stats.apply_all(spec.deltas);
                state.pending = None;
                state.message = spec.success_message.to_string();
                // The exit message wins over the success message.
                let exited_ronron = mode::check_exit(state);
                ActionOutcome::Applied { exited_ronron }
            } else {
                state.pending = Some(PendingAction { action, count });
                state.message = format!(
                    "{} {}/{}... Continue !",
                    action.label(),
                    count,
                    RONRON_REQUIRED_PRESSES
                );
                ActionOutcome::Progress { count }
            }
        }
    }
}

/// Apply a rare-event override. Mode checks never run here: the zero-all
/// effects set ronron themselves, the others leave the mode alone.
pub fn apply_rare_effect(state: &mut PetState, effect: RareEffect) {
    match effect {
        RareEffect::ZeroAll => {
            state.stats.set_all(0);
            mode::force_enter(state);
        }
        RareEffect::AllButCleanlinessMax => {
            for stat in [Stat::Happiness, Stat::Vitality, Stat::Rest, Stat::Psyche] {
                state.stats.set(stat, 100);
            }
        }
        RareEffect::PsycheMax => {
            state.stats.set(Stat::Psyche, 100);
        }
    }
}

fn roll(state: &mut PetState, chance: f32) -> bool {
    match state.rng.as_mut() {
        Some(rng) => rng.random::<f32>() < chance,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::{MSG_RONRON_EXIT, RONRON_ENTER_THRESHOLD};
    use crate::stats::{STAT_MAX, STAT_MIN};

    fn quiet_state() -> PetState {
        let mut state = PetState::new(0);
        state.rng = None;
        state
    }

    #[test]
    fn spec_table_is_sane() {
        for action in ActionId::ALL {
            let spec = action.spec();
            assert!(!spec.deltas.is_empty(), "{action} has no deltas");
            for &(_, delta) in spec.deltas {
                assert!(delta > 0 && delta <= STAT_MAX, "{action} delta {delta}");
            }
            if let Some(rare) = spec.rare {
                assert!(rare.chance > 0.0 && rare.chance <= 1.0);
            }
        }
    }

    #[test]
    fn action_name_roundtrip() {
        for action in ActionId::ALL {
            assert_eq!(action.as_str().parse::<ActionId>(), Ok(action));
        }
        assert_eq!("feed".parse::<ActionId>(), Ok(ActionId::Sugar));
        assert_eq!("daniel".parse::<ActionId>(), Err(()));
    }

    #[test]
    fn normal_mode_applies_immediately() {
        let mut state = quiet_state();
        let outcome = perform(&mut state, ActionId::Hug);
        assert_eq!(
            outcome,
            ActionOutcome::Applied {
                exited_ronron: false
            }
        );
        assert_eq!(state.stats.happiness, 60);
        assert_eq!(state.stats.rest, 65);
        assert_eq!(state.message, MSG_HUG);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn normal_mode_repeats_are_idempotent_deltas() {
        let mut state = quiet_state();
        perform(&mut state, ActionId::Coffee);
        assert_eq!(state.stats.vitality, 85);
        perform(&mut state, ActionId::Coffee);
        // Second application clamps independently.
        assert_eq!(state.stats.vitality, STAT_MAX);
    }

    #[test]
    fn ronron_requires_three_presses() {
        let mut state = quiet_state();
        state.stats.set_all(10);
        assert!(mode::check_enter(&mut state));

        let first = perform(&mut state, ActionId::Sugar);
        assert_eq!(first, ActionOutcome::Progress { count: 1 });
        assert_eq!(state.stats.vitality, 10);
        assert_eq!(state.message, "Miam sucré 1/3... Continue !");

        let second = perform(&mut state, ActionId::Sugar);
        assert_eq!(second, ActionOutcome::Progress { count: 2 });
        assert_eq!(state.stats.vitality, 10);
        assert_eq!(state.message, "Miam sucré 2/3... Continue !");

        let third = perform(&mut state, ActionId::Sugar);
        assert_eq!(
            third,
            ActionOutcome::Applied {
                exited_ronron: false
            }
        );
        assert_eq!(state.stats.vitality, 35);
        assert!(state.pending.is_none());
        assert_eq!(state.message, MSG_SUGAR);
        assert!(state.mode.is_ronron());
    }

    #[test]
    fn switching_actions_restarts_the_count() {
        let mut state = quiet_state();
        state.stats.set_all(10);
        mode::check_enter(&mut state);

        perform(&mut state, ActionId::Sugar);
        perform(&mut state, ActionId::Sugar);
        let outcome = perform(&mut state, ActionId::Iris);
        assert_eq!(outcome, ActionOutcome::Progress { count: 1 });
        assert_eq!(
            state.pending,
            Some(PendingAction {
                action: ActionId::Iris,
                count: 1
            })
        );
        // The abandoned action never applied.
        assert_eq!(state.stats.vitality, 10);
    }

    #[test]
    fn completion_can_exit_ronron_and_the_exit_message_wins() {
        let mut state = quiet_state();
        state.stats.set_all(45);
        state.stats.set(Stat::Vitality, RONRON_ENTER_THRESHOLD - 1);
        mode::check_enter(&mut state);

        // Three sugar presses push vitality to 44; everything is >= 40.
        perform(&mut state, ActionId::Sugar);
        perform(&mut state, ActionId::Sugar);
        let outcome = perform(&mut state, ActionId::Sugar);
        assert_eq!(outcome, ActionOutcome::Applied { exited_ronron: true });
        assert_eq!(state.mode, Mode::Normal);
        assert!(state.pending.is_none());
        assert_eq!(state.message, MSG_RONRON_EXIT);
    }

    #[test]
    fn no_rng_means_no_rare_events() {
        let mut state = quiet_state();
        for _ in 0..200 {
            perform(&mut state, ActionId::Spa);
        }
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.stats.happiness, STAT_MAX);
    }

    #[test]
    fn zero_all_effect_forces_ronron() {
        let mut state = quiet_state();
        state.pending = None;
        apply_rare_effect(&mut state, RareEffect::ZeroAll);
        for stat in Stat::ALL {
            assert_eq!(state.stats.get(stat), STAT_MIN);
        }
        assert!(state.mode.is_ronron());
        assert!(state.ronron_unlocked);
    }

    #[test]
    fn coco_pops_boost_leaves_cleanliness_alone() {
        let mut state = quiet_state();
        state.stats.set(Stat::Cleanliness, 37);
        apply_rare_effect(&mut state, RareEffect::AllButCleanlinessMax);
        assert_eq!(state.stats.happiness, 100);
        assert_eq!(state.stats.vitality, 100);
        assert_eq!(state.stats.rest, 100);
        assert_eq!(state.stats.psyche, 100);
        assert_eq!(state.stats.cleanliness, 37);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn psyche_max_effect_only_touches_psyche() {
        let mut state = quiet_state();
        apply_rare_effect(&mut state, RareEffect::PsycheMax);
        assert_eq!(state.stats.psyche, 100);
        assert_eq!(state.stats.happiness, 50);
        assert_eq!(state.mode, Mode::Normal);
    }
}

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::mode::{Mode, PendingAction};
use crate::save::SaveData;
use crate::stats::Stats;

pub const MSG_GREETING: &str = "Coucou ! Je suis Piloune ! 👻";

/// The whole mutable state of one Piloune instance. Owned by a single
/// controller; there are no ambient globals.
#[derive(Debug, Clone)]
pub struct PetState {
    pub stats: Stats,
    pub mode: Mode,
    /// Set the first time ronron mode is entered, never cleared.
    pub ronron_unlocked: bool,
    /// Repetition progress, only meaningful while `mode` is ronron.
    pub pending: Option<PendingAction>,
    /// Last message shown to the player.
    pub message: String,
    /// Stamped by the engine on every performed action, for the
    /// persistence collaborator.
    pub last_action_at: Option<DateTime<Utc>>,
    pub seed: u64,
    /// Rare-event RNG. `None` disables rare events entirely, which is the
    /// deterministic hook the tests rely on.
    pub rng: Option<ChaCha20Rng>,
}

impl PetState {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stats: Stats::default(),
            mode: Mode::Normal,
            ronron_unlocked: false,
            pending: None,
            message: MSG_GREETING.to_string(),
            last_action_at: None,
            seed,
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    /// Rebuild a live state from a persisted snapshot. The snapshot's mode
    /// flags are authoritative; pending repetition never survives a reload,
    /// so the "pending is None while normal" invariant holds on every load
    /// path. A fresh RNG is attached from the engine seed.
    #[must_use]
    pub fn from_save(data: &SaveData, seed: u64) -> Self {
        let mut stats = Stats {
            happiness: data.happiness,
            vitality: data.vitality,
            rest: data.rest,
            cleanliness: data.cleanliness,
            psyche: data.psyche,
        };
        stats.clamp();
        Self {
            stats,
            mode: if data.is_ronron {
                Mode::Ronron
            } else {
                Mode::Normal
            },
            // Being ronron implies the unlock already happened; repair
            // inconsistent snapshots in the monotonic direction.
            ronron_unlocked: data.ronron_unlocked || data.is_ronron,
            pending: None,
            message: MSG_GREETING.to_string(),
            last_action_at: None,
            seed,
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
        }
    }
}

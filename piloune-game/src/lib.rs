//! Piloune Game Engine
//!
//! Platform-agnostic core logic for the Piloune ghost-companion toy.
//! This crate provides the stat store, the ronron mode state machine, the
//! action engine and the decay tick without UI or platform-specific
//! dependencies. Frontends supply storage, a clock and a render loop.

pub mod actions;
pub mod decay;
pub mod mode;
pub mod save;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use actions::{ActionId, ActionOutcome, ActionSpec, RareEffect, RareEvent, perform};
pub use decay::{DECAY_PERIOD_SECS, DECAY_STEP, decay_tick};
pub use mode::{
    Mode, PendingAction, RONRON_ENTER_THRESHOLD, RONRON_EXIT_THRESHOLD, RONRON_REQUIRED_PRESSES,
};
pub use save::{SAVE_MAX_AGE_HOURS, SAVE_VERSION, SaveData};
pub use state::{MSG_GREETING, PetState};
pub use stats::{STAT_DEFAULT, STAT_MAX, STAT_MIN, Stat, Stats};

use chrono::{DateTime, Utc};

const MSG_RONRON_FORCED: &str = "Mode ronron forcé pour le debug";
const MSG_SECRET_CODE: &str = "Code secret activé ! Toutes les stats sont au maximum ! 🎉";

/// Trait for abstracting snapshot persistence.
/// Platform-specific implementations should provide this.
pub trait SaveStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, data: &SaveData) -> Result<(), Self::Error>;

    /// Load the persisted snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    fn load(&self) -> Result<Option<SaveData>, Self::Error>;

    /// Remove the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be removed.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Trait for abstracting wall-clock access, so tests inject a fixed clock
/// instead of real timers.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Main engine owning one [`PetState`] plus the storage and clock
/// collaborators. Every mutation path runs synchronously; callers render
/// from [`PilouneEngine::state`] after each call.
pub struct PilouneEngine<S, C = SystemClock>
where
    S: SaveStorage,
    C: Clock,
{
    storage: S,
    clock: C,
    state: PetState,
}

impl<S, C> PilouneEngine<S, C>
where
    S: SaveStorage,
    C: Clock,
{
    /// Create an engine with a fresh default state.
    pub fn new(storage: S, clock: C, seed: u64) -> Self {
        Self {
            storage,
            clock,
            state: PetState::new(seed),
        }
    }

    /// Create an engine from the persisted snapshot when one exists and is
    /// fresh; fall back to defaults otherwise. Storage failures and stale
    /// or unreadable snapshots are logged and never fatal.
    pub fn load_or_new(storage: S, clock: C, seed: u64) -> Self {
        let state = match storage.load() {
            Ok(Some(data)) => {
                if data.is_stale(clock.now()) {
                    log::info!("snapshot is stale, starting fresh");
                    if let Err(err) = storage.clear() {
                        log::warn!("could not remove stale snapshot: {err}");
                    }
                    PetState::new(seed)
                } else {
                    log::info!("restored snapshot (mode {})", data.mode());
                    PetState::from_save(&data, seed)
                }
            }
            Ok(None) => PetState::new(seed),
            Err(err) => {
                log::warn!("snapshot load failed, starting fresh: {err}");
                PetState::new(seed)
            }
        };
        Self {
            storage,
            clock,
            state,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PetState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PetState {
        &mut self.state
    }

    /// Resolve one action press and stamp the action timestamp, on every
    /// path including rare events.
    pub fn perform(&mut self, action: ActionId) -> ActionOutcome {
        let outcome = actions::perform(&mut self.state, action);
        self.state.last_action_at = Some(self.clock.now());
        outcome
    }

    /// Run one decay tick. Returns whether ronron mode was entered.
    pub fn decay_tick(&mut self) -> bool {
        decay::decay_tick(&mut self.state)
    }

    /// Best-effort persistence: failures are logged and swallowed, never
    /// interrupting gameplay.
    pub fn save(&self) {
        let data = SaveData::from_state(&self.state, self.clock.now());
        match self.storage.save(&data) {
            Ok(()) => log::debug!("snapshot saved"),
            Err(err) => log::warn!("save skipped: {err}"),
        }
    }

    /// Debug override: stats back to defaults, mode back to normal. The
    /// unlock flag stays set.
    pub fn reset_stats(&mut self) {
        self.state.stats.set_all(STAT_DEFAULT);
        self.state.mode = Mode::Normal;
        self.state.pending = None;
        log::info!("stats reset");
    }

    /// Debug override: every stat to the maximum. Mode is left alone; a
    /// ronron exit still requires an action completion.
    pub fn max_stats(&mut self) {
        self.state.stats.set_all(STAT_MAX);
        log::info!("stats maxed");
    }

    /// Debug override: force ronron mode.
    pub fn force_ronron(&mut self) {
        mode::force_enter(&mut self.state);
        self.state.message = MSG_RONRON_FORCED.to_string();
        log::info!("ronron mode forced");
    }

    /// The secret key-sequence reward: all stats to the maximum.
    pub fn secret_code(&mut self) {
        self.state.stats.set_all(STAT_MAX);
        self.state.message = MSG_SECRET_CODE.to_string();
        log::info!("secret code activated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::fmt;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MemoryStorage {
        slot: Rc<RefCell<Option<SaveData>>>,
    }

    impl SaveStorage for MemoryStorage {
        type Error = Infallible;

        fn save(&self, data: &SaveData) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = Some(data.clone());
            Ok(())
        }

        fn load(&self) -> Result<Option<SaveData>, Self::Error> {
            Ok(self.slot.borrow().clone())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = None;
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BrokenStorageError;

    impl fmt::Display for BrokenStorageError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("storage unavailable")
        }
    }

    impl std::error::Error for BrokenStorageError {}

    /// Storage that fails every operation.
    struct BrokenStorage;

    impl SaveStorage for BrokenStorage {
        type Error = BrokenStorageError;

        fn save(&self, _data: &SaveData) -> Result<(), Self::Error> {
            Err(BrokenStorageError)
        }

        fn load(&self) -> Result<Option<SaveData>, Self::Error> {
            Err(BrokenStorageError)
        }

        fn clear(&self) -> Result<(), Self::Error> {
            Err(BrokenStorageError)
        }
    }

    #[derive(Clone, Copy)]
    struct FixedClock(chrono::DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            self.0
        }
    }

    fn fixed_now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn engine_saves_and_restores_state() {
        let storage = MemoryStorage::default();
        let clock = FixedClock(fixed_now());

        let mut engine = PilouneEngine::new(storage.clone(), clock, 1);
        engine.state_mut().rng = None;
        engine.perform(ActionId::Hug);
        engine.save();

        let restored = PilouneEngine::load_or_new(storage, clock, 1);
        assert_eq!(restored.state().stats.happiness, 60);
        assert_eq!(restored.state().stats.rest, 65);
        assert_eq!(restored.state().mode, Mode::Normal);
        // Restored states greet again rather than replaying the last message.
        assert_eq!(restored.state().message, MSG_GREETING);
    }

    #[test]
    fn stale_snapshot_falls_back_to_defaults_and_is_cleared() {
        let storage = MemoryStorage::default();
        let saved_clock = FixedClock(fixed_now() - Duration::hours(25));

        let mut engine = PilouneEngine::new(storage.clone(), saved_clock, 1);
        engine.state_mut().stats.set_all(5);
        engine.save();

        let engine = PilouneEngine::load_or_new(storage.clone(), FixedClock(fixed_now()), 1);
        assert_eq!(engine.state().stats, Stats::default());
        assert!(storage.slot.borrow().is_none());
    }

    #[test]
    fn broken_storage_never_interrupts_gameplay() {
        let mut engine = PilouneEngine::load_or_new(BrokenStorage, FixedClock(fixed_now()), 1);
        assert_eq!(engine.state().stats, Stats::default());
        engine.perform(ActionId::Coffee);
        engine.save();
        assert_eq!(engine.state().stats.vitality, 85);
    }

    #[test]
    fn perform_stamps_the_action_timestamp() {
        let mut engine = PilouneEngine::new(MemoryStorage::default(), FixedClock(fixed_now()), 1);
        engine.state_mut().rng = None;
        assert!(engine.state().last_action_at.is_none());
        engine.perform(ActionId::Iris);
        assert_eq!(engine.state().last_action_at, Some(fixed_now()));
    }

    #[test]
    fn debug_overrides_respect_the_sticky_unlock() {
        let mut engine = PilouneEngine::new(MemoryStorage::default(), FixedClock(fixed_now()), 1);
        engine.force_ronron();
        assert!(engine.state().mode.is_ronron());
        assert!(engine.state().ronron_unlocked);

        engine.reset_stats();
        assert_eq!(engine.state().mode, Mode::Normal);
        assert!(engine.state().pending.is_none());
        assert!(engine.state().ronron_unlocked);
    }

    #[test]
    fn max_stats_does_not_exit_ronron() {
        let mut engine = PilouneEngine::new(MemoryStorage::default(), FixedClock(fixed_now()), 1);
        engine.state_mut().rng = None;
        engine.force_ronron();
        engine.max_stats();
        assert!(engine.state().mode.is_ronron());

        // The next completed action finally exits.
        engine.perform(ActionId::Twitch);
        engine.perform(ActionId::Twitch);
        let outcome = engine.perform(ActionId::Twitch);
        assert_eq!(outcome, ActionOutcome::Applied { exited_ronron: true });
        assert_eq!(engine.state().mode, Mode::Normal);
    }

    #[test]
    fn secret_code_maxes_stats_and_announces_it() {
        let mut engine = PilouneEngine::new(MemoryStorage::default(), FixedClock(fixed_now()), 1);
        engine.secret_code();
        assert!(engine.state().stats.all_at_least(STAT_MAX));
        assert_eq!(engine.state().message, MSG_SECRET_CODE);
    }
}

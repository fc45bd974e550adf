//! Periodic stat decay. Scheduling belongs to the driver; this module only
//! owns the tick itself.

use crate::mode;
use crate::state::PetState;
use crate::stats::Stat;

/// Amount removed from every stat on each tick.
pub const DECAY_STEP: i32 = 1;
/// Nominal tick period, for drivers that want the default cadence.
pub const DECAY_PERIOD_SECS: u64 = 60;

/// Lower all stats by [`DECAY_STEP`], then re-run the ronron enter check.
/// Decay can never trigger recovery, so the exit check is deliberately
/// absent here. Returns whether ronron mode was entered.
pub fn decay_tick(state: &mut PetState) -> bool {
    for stat in Stat::ALL {
        state.stats.apply(stat, -DECAY_STEP);
    }
    log::debug!(
        "decay tick: B{} V{} R{} P{} Psy{}",
        state.stats.happiness,
        state.stats.vitality,
        state.stats.rest,
        state.stats.cleanliness,
        state.stats.psyche
    );
    mode::check_enter(state)
}

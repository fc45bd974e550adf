use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;
pub const STAT_DEFAULT: i32 = 50;

/// The five bounded attributes of Piloune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Happiness,
    Vitality,
    Rest,
    Cleanliness,
    Psyche,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Happiness,
        Stat::Vitality,
        Stat::Rest,
        Stat::Cleanliness,
        Stat::Psyche,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Vitality => "vitality",
            Self::Rest => "rest",
            Self::Cleanliness => "cleanliness",
            Self::Psyche => "psyche",
        }
    }

    /// User-facing label, matching the original French UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Happiness => "Bonheur",
            Self::Vitality => "Vitalité",
            Self::Rest => "Repos",
            Self::Cleanliness => "Propreté",
            Self::Psyche => "Psy",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happiness" => Ok(Self::Happiness),
            "vitality" => Ok(Self::Vitality),
            "rest" => Ok(Self::Rest),
            "cleanliness" => Ok(Self::Cleanliness),
            "psyche" => Ok(Self::Psyche),
            _ => Err(()),
        }
    }
}

/// The stat store. Every mutation path clamps to [`STAT_MIN`]..=[`STAT_MAX`],
/// so values outside the range are unrepresentable once the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub happiness: i32,
    pub vitality: i32,
    pub rest: i32,
    pub cleanliness: i32,
    pub psyche: i32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            happiness: STAT_DEFAULT,
            vitality: STAT_DEFAULT,
            rest: STAT_DEFAULT,
            cleanliness: STAT_DEFAULT,
            psyche: STAT_DEFAULT,
        }
    }
}

impl Stats {
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Happiness => self.happiness,
            Stat::Vitality => self.vitality,
            Stat::Rest => self.rest,
            Stat::Cleanliness => self.cleanliness,
            Stat::Psyche => self.psyche,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Happiness => &mut self.happiness,
            Stat::Vitality => &mut self.vitality,
            Stat::Rest => &mut self.rest,
            Stat::Cleanliness => &mut self.cleanliness,
            Stat::Psyche => &mut self.psyche,
        }
    }

    /// Set one stat to `value`, clamped. Returns the stored value.
    pub fn set(&mut self, stat: Stat, value: i32) -> i32 {
        let slot = self.slot_mut(stat);
        *slot = value.clamp(STAT_MIN, STAT_MAX);
        *slot
    }

    /// Add `delta` (which may be negative) to one stat, clamped.
    /// Returns the new value.
    pub fn apply(&mut self, stat: Stat, delta: i32) -> i32 {
        let current = self.get(stat);
        self.set(stat, current.saturating_add(delta))
    }

    /// Apply a batch of deltas. Callers never observe a partially applied
    /// batch: mutation is synchronous and single-threaded.
    pub fn apply_all(&mut self, deltas: &[(Stat, i32)]) {
        for &(stat, delta) in deltas {
            self.apply(stat, delta);
        }
    }

    /// Override every stat with the same clamped value. Used by rare events
    /// and the debug overrides.
    pub fn set_all(&mut self, value: i32) {
        for stat in Stat::ALL {
            self.set(stat, value);
        }
    }

    #[must_use]
    pub fn any_below(&self, threshold: i32) -> bool {
        Stat::ALL.iter().any(|&s| self.get(s) < threshold)
    }

    #[must_use]
    pub fn all_at_least(&self, threshold: i32) -> bool {
        Stat::ALL.iter().all(|&s| self.get(s) >= threshold)
    }

    /// Clamp all stats to the valid range.
    pub fn clamp(&mut self) {
        for stat in Stat::ALL {
            let current = self.get(stat);
            self.set(stat, current);
        }
    }
}

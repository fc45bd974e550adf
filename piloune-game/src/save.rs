//! Snapshot model for the persistence collaborator.
//!
//! Snapshots are deliberately lenient on the way in: each stat and flag
//! recovers independently when its field is missing or carries the wrong
//! JSON type, so one corrupted field never throws away a whole save. Only
//! `saved_at` is strict — a snapshot whose timestamp is absent or
//! unreadable counts as stale.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::mode::Mode;
use crate::state::PetState;
use crate::stats::{STAT_DEFAULT, STAT_MAX, STAT_MIN};

pub const SAVE_VERSION: &str = "1.0.0";
/// Snapshots older than this are discarded and treated as absent.
pub const SAVE_MAX_AGE_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default = "default_stat", deserialize_with = "lenient_stat")]
    pub happiness: i32,
    #[serde(default = "default_stat", deserialize_with = "lenient_stat")]
    pub vitality: i32,
    #[serde(default = "default_stat", deserialize_with = "lenient_stat")]
    pub rest: i32,
    #[serde(default = "default_stat", deserialize_with = "lenient_stat")]
    pub cleanliness: i32,
    #[serde(default = "default_stat", deserialize_with = "lenient_stat")]
    pub psyche: i32,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_ronron: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub ronron_unlocked: bool,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: default_version(),
            saved_at: None,
            happiness: STAT_DEFAULT,
            vitality: STAT_DEFAULT,
            rest: STAT_DEFAULT,
            cleanliness: STAT_DEFAULT,
            psyche: STAT_DEFAULT,
            is_ronron: false,
            ronron_unlocked: false,
        }
    }
}

impl SaveData {
    #[must_use]
    pub fn from_state(state: &PetState, now: DateTime<Utc>) -> Self {
        Self {
            version: default_version(),
            saved_at: Some(now),
            happiness: state.stats.happiness,
            vitality: state.stats.vitality,
            rest: state.stats.rest,
            cleanliness: state.stats.cleanliness,
            psyche: state.stats.psyche,
            is_ronron: state.mode.is_ronron(),
            ronron_unlocked: state.ronron_unlocked,
        }
    }

    /// A snapshot is fresh only while its timestamp is present and less
    /// than [`SAVE_MAX_AGE_HOURS`] old.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.saved_at {
            Some(saved_at) => {
                now.signed_duration_since(saved_at) >= Duration::hours(SAVE_MAX_AGE_HOURS)
            }
            None => true,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        if self.is_ronron {
            Mode::Ronron
        } else {
            Mode::Normal
        }
    }
}

fn default_version() -> String {
    SAVE_VERSION.to_string()
}

const fn default_stat() -> i32 {
    STAT_DEFAULT
}

fn lenient_stat<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let stat = value
        .as_i64()
        .map_or(i64::from(STAT_DEFAULT), |v| {
            v.clamp(i64::from(STAT_MIN), i64::from(STAT_MAX))
        });
    Ok(stat as i32)
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(false))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

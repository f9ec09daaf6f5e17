//! Cycle advancement gate configuration.

use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;

use crate::domain::gate::{AdvancementGate, DEFAULT_MIN_ACTIVE_DAYS};

/// Largest accepted day offset, one full day in minutes.
pub const MAX_DAY_OFFSET_MINUTES: i32 = 24 * 60;

/// Advancement gate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GateConfig {
    /// Distinct betting days required to close a cycle (default: 10).
    #[serde(default = "default_min_active_days")]
    pub min_active_days: u32,
    /// Offset from UTC, in minutes, used to decide calendar days (default: 0).
    #[serde(default)]
    pub day_offset_minutes: i32,
}

const fn default_min_active_days() -> u32 {
    DEFAULT_MIN_ACTIVE_DAYS
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_active_days: default_min_active_days(),
            day_offset_minutes: 0,
        }
    }
}

impl GateConfig {
    /// Day offset as a chrono offset, `None` when out of range.
    #[must_use]
    pub fn day_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.day_offset_minutes.checked_mul(60)?)
    }

    /// Build the gate. Falls back to UTC if the offset is out of range;
    /// validated configs never are.
    #[must_use]
    pub fn gate(&self) -> AdvancementGate {
        let offset = self.day_offset().unwrap_or_else(|| Utc.fix());
        AdvancementGate::new(self.min_active_days, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ten_utc_days() {
        let gate = GateConfig::default().gate();
        assert_eq!(gate, AdvancementGate::default());
        assert_eq!(gate.min_active_days(), 10);
    }

    #[test]
    fn offset_is_converted_from_minutes() {
        let config = GateConfig {
            min_active_days: 3,
            day_offset_minutes: -180,
        };
        assert_eq!(config.day_offset(), FixedOffset::west_opt(3 * 3600));
    }

    #[test]
    fn full_day_offset_is_out_of_range() {
        let config = GateConfig {
            min_active_days: 3,
            day_offset_minutes: MAX_DAY_OFFSET_MINUTES,
        };
        assert_eq!(config.day_offset(), None);
    }
}

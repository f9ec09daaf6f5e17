//! Gated advancement from one ladder cycle to the next.
//!
//! A cycle can only be closed once its wagers span a minimum number of
//! distinct calendar days. Advancing is the only transition of a project's
//! active cycle, and it moves by exactly one.

use std::collections::HashSet;

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::{CycleIndex, Project, Wager};

/// Distinct betting days required before a cycle may close.
pub const DEFAULT_MIN_ACTIVE_DAYS: u32 = 10;

/// Outcome of an advancement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Advancement {
    /// The gate opened; this is the new snapshot to persist.
    Advanced(Project),
    /// Not enough activity in the active cycle yet.
    Rejected { active_days: u32, required: u32 },
    /// The project has no staking ladder to advance.
    NotCompounding,
}

impl Advancement {
    /// Returns true if the project moved to the next cycle.
    #[must_use]
    pub fn is_advanced(&self) -> bool {
        matches!(self, Advancement::Advanced(_))
    }
}

/// Activity snapshot of the active cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateStatus {
    pub cycle: CycleIndex,
    pub active_days: u32,
    pub required: u32,
    pub can_advance: bool,
}

/// Minimum-activity gate for cycle advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvancementGate {
    min_active_days: u32,
    day_offset: FixedOffset,
}

impl Default for AdvancementGate {
    fn default() -> Self {
        Self {
            min_active_days: DEFAULT_MIN_ACTIVE_DAYS,
            day_offset: Utc.fix(),
        }
    }
}

impl AdvancementGate {
    /// Create a gate counting calendar days in `day_offset`.
    #[must_use]
    pub fn new(min_active_days: u32, day_offset: FixedOffset) -> Self {
        Self {
            min_active_days,
            day_offset,
        }
    }

    #[must_use]
    pub fn min_active_days(&self) -> u32 {
        self.min_active_days
    }

    /// Count the distinct calendar days represented in `wagers`.
    pub fn active_days<'a, I>(&self, wagers: I) -> u32
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        let days: HashSet<_> = wagers
            .into_iter()
            .map(|w| w.date.with_timezone(&self.day_offset).date_naive())
            .collect();
        u32::try_from(days.len()).unwrap_or(u32::MAX)
    }

    /// Whether the active cycle's wagers satisfy the activity requirement.
    pub fn can_advance<'a, I>(&self, cycle_wagers: I) -> bool
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        self.active_days(cycle_wagers) >= self.min_active_days
    }

    /// Gate status for the project's active cycle.
    pub fn status<'a, I>(&self, project: &Project, cycle_wagers: I) -> GateStatus
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        let active_days = self.active_days(cycle_wagers);
        GateStatus {
            cycle: project.active_cycle(),
            active_days,
            required: self.min_active_days,
            can_advance: active_days >= self.min_active_days,
        }
    }

    /// Close the active cycle and open the next one if the gate allows it.
    ///
    /// `cycle_wagers` must be the wagers attributed to the active cycle. A
    /// rejection leaves `project` untouched.
    pub fn advance<'a, I>(&self, project: &Project, cycle_wagers: I) -> Advancement
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        if project.plan().is_none() {
            warn!(project = %project.id(), "Advancement requested for a standard project");
            return Advancement::NotCompounding;
        }

        let status = self.status(project, cycle_wagers);
        if !status.can_advance {
            warn!(
                project = %project.id(),
                cycle = %status.cycle,
                active_days = status.active_days,
                required = status.required,
                "Advancement rejected"
            );
            return Advancement::Rejected {
                active_days: status.active_days,
                required: status.required,
            };
        }

        let next = project.advanced();
        info!(
            project = %project.id(),
            from = %status.cycle,
            to = %next.active_cycle(),
            "Cycle advanced"
        );
        Advancement::Advanced(next)
    }
}

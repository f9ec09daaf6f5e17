//! Theoretical stake/bankroll ladder for goal-based compounding.
//!
//! The ladder is derived purely from a [`StakingPlan`]: each step stakes
//! `bank / division`, targets `stake × 2.5` and hands `bank + goal` to the
//! next step. Realized results never feed back into the ladder; they are
//! overlaid by the reconciler.
//!
//! # Examples
//!
//! ```
//! use stakeladder::domain::{Ladder, StakingPlan};
//! use rust_decimal_macros::dec;
//!
//! let plan = StakingPlan::try_new(dec!(100), 10, None).unwrap();
//! let ladder = Ladder::build(&plan, 0).unwrap();
//!
//! let first = ladder.step(0).unwrap();
//! assert_eq!(first.planned_stake, dec!(10));
//! assert_eq!(first.planned_goal, dec!(25));
//! assert_eq!(ladder.step(1).unwrap().bank_at_start, dec!(125));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use super::error::LadderError;
use super::money::{clamped_percent, Money, Percent};
use super::{CycleIndex, StakingPlan};

/// Target return on stake for every step.
pub const GOAL_MULTIPLIER: Decimal = dec!(2.5);

/// Hard ceiling on how far past the covered step the ladder may search.
pub const SAFETY_BOUND: usize = 100;

/// Minimum number of rows materialized for an uncapped ladder.
pub const UNCAPPED_MIN_ROWS: usize = 20;

/// Extra rows past the covered cycle for an uncapped ladder.
pub const UNCAPPED_LOOKAHEAD: usize = 5;

/// One planned step of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub index: CycleIndex,
    pub bank_at_start: Money,
    pub planned_stake: Money,
    pub planned_goal: Money,
}

/// An eagerly materialized, finite ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ladder {
    steps: Vec<PlannedStep>,
}

impl Ladder {
    /// Build the ladder for `plan`, covering at least step `min_steps_covered`.
    ///
    /// With a cap, the ladder stops after the first step whose stake has
    /// reached the cap and whose index is at least `min_steps_covered`; the
    /// stake (and therefore the goal) never exceeds the cap. Without a cap,
    /// or with a non-positive bankroll that can never reach one, it stops after
    /// `max(20, min_steps_covered + 6)` rows.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::Unbounded`] when a capped ladder does not reach
    /// its cap within [`SAFETY_BOUND`] steps past `min_steps_covered`, and
    /// [`LadderError::Overflow`] when the bank outgrows the decimal range.
    /// Uncapped plans grow by `1 + 2.5 / division` per step, so a division of
    /// 1 overflows after roughly 50 steps.
    pub fn build(plan: &StakingPlan, min_steps_covered: usize) -> Result<Self, LadderError> {
        let division = Decimal::from(plan.division().get());
        let cap = plan
            .stake_goal_cap()
            .filter(|_| plan.start_bankroll() > Decimal::ZERO);
        let uncapped_last = (UNCAPPED_MIN_ROWS - 1).max(min_steps_covered + UNCAPPED_LOOKAHEAD);
        let bound = match cap {
            Some(_) => SAFETY_BOUND + min_steps_covered,
            None => SAFETY_BOUND.max(uncapped_last + 1),
        };

        let mut steps = Vec::new();
        let mut bank = plan.start_bankroll();

        for i in 0..bound {
            let raw_stake = bank / division;
            let stake = match cap {
                Some(cap) => raw_stake.min(cap),
                None => raw_stake,
            };
            let goal = stake
                .checked_mul(GOAL_MULTIPLIER)
                .ok_or(LadderError::Overflow { index: i })?;

            steps.push(PlannedStep {
                index: CycleIndex::new(i as u32),
                bank_at_start: bank,
                planned_stake: stake,
                planned_goal: goal,
            });

            let done = match cap {
                Some(cap) => stake >= cap && i >= min_steps_covered,
                None => i >= uncapped_last,
            };
            if done {
                debug!(
                    steps = steps.len(),
                    capped = cap.is_some(),
                    "Ladder materialized"
                );
                return Ok(Self { steps });
            }

            bank = bank
                .checked_add(goal)
                .ok_or(LadderError::Overflow { index: i })?;
        }

        Err(LadderError::Unbounded { bound })
    }

    /// All planned steps in order.
    #[must_use]
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Number of planned steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Planned step at `index`, if the ladder reaches it.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&PlannedStep> {
        self.steps.get(index)
    }

    /// Planned step for a cycle.
    #[must_use]
    pub fn at(&self, cycle: CycleIndex) -> Option<&PlannedStep> {
        self.step(cycle.as_usize())
    }

    /// Recommended stake for the active cycle.
    ///
    /// Falls back to the plan's initial stake if the ladder does not reach
    /// `active`.
    #[must_use]
    pub fn working_stake(&self, plan: &StakingPlan, active: CycleIndex) -> Money {
        self.at(active)
            .map_or_else(|| plan.initial_stake(), |step| step.planned_stake)
    }
}

/// How far `working_stake` has climbed from the initial stake towards the cap.
///
/// Zero for uncapped plans and for caps at or below the initial stake.
#[must_use]
pub fn stake_progress(plan: &StakingPlan, working_stake: Money) -> Percent {
    let Some(cap) = plan.stake_goal_cap() else {
        return Decimal::ZERO;
    };
    let initial = plan.initial_stake();
    if cap <= initial {
        return Decimal::ZERO;
    }
    clamped_percent(working_stake - initial, cap - initial)
}

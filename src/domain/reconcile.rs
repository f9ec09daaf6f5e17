//! Realized-versus-planned reconciliation with surplus carry-over.
//!
//! Each cycle's realized profit is compared against its planned goal. Past
//! cycles cap the displayed profit at the goal and carry any surplus into
//! the next cycle; a shortfall stays with the cycle that produced it and is
//! never carried forward as debt. The active cycle shows everything it has,
//! uncapped, and carries nothing.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::cycle::CycleGroups;
use super::error::DomainError;
use super::ladder::Ladder;
use super::money::{clamped_percent, Money, Percent};
use super::CycleIndex;

/// Whether a cycle has been formally closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    Closed,
    InProgress,
}

/// Reconciled result for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleLedgerEntry {
    pub index: CycleIndex,
    pub status: CycleStatus,
    pub bank_at_start: Money,
    pub planned_stake: Money,
    pub planned_goal: Money,
    /// Sum of the profit of every wager attributed to the cycle.
    pub raw_profit: Money,
    pub incoming_carry: Money,
    pub display_profit: Money,
    pub outgoing_carry: Money,
    pub met_goal: bool,
}

impl CycleLedgerEntry {
    /// Realized profit against the goal, clamped to `0..=100`.
    #[must_use]
    pub fn progress_pct(&self) -> Percent {
        clamped_percent(self.raw_profit, self.planned_goal)
    }

    /// Planned opening bank plus realized profit.
    #[must_use]
    pub fn final_balance(&self) -> Money {
        self.bank_at_start + self.raw_profit
    }
}

/// Reconcile every cycle from zero through `active`.
///
/// # Errors
///
/// Returns [`DomainError::LadderTooShort`] if `ladder` has no step for `active`.
pub fn reconcile(
    ladder: &Ladder,
    groups: &CycleGroups,
    active: CycleIndex,
) -> Result<Vec<CycleLedgerEntry>, DomainError> {
    if ladder.at(active).is_none() {
        return Err(DomainError::LadderTooShort {
            len: ladder.len(),
            active,
        });
    }

    let mut carry = Decimal::ZERO;
    let mut entries = Vec::with_capacity(active.as_usize() + 1);

    for (index, step) in active.through().zip(ladder.steps()) {
        let raw_profit: Money = groups.get(index).iter().map(|w| w.profit).sum();
        let available = raw_profit + carry;
        let goal = step.planned_goal;

        let (status, display_profit, outgoing_carry) = if index < active {
            if available > goal {
                (CycleStatus::Closed, goal, available - goal)
            } else {
                (CycleStatus::Closed, available, Decimal::ZERO)
            }
        } else {
            (CycleStatus::InProgress, available, Decimal::ZERO)
        };

        entries.push(CycleLedgerEntry {
            index,
            status,
            bank_at_start: step.bank_at_start,
            planned_stake: step.planned_stake,
            planned_goal: goal,
            raw_profit,
            incoming_carry: carry,
            display_profit,
            outgoing_carry,
            met_goal: available >= goal,
        });
        carry = outgoing_carry;
    }

    debug!(cycles = entries.len(), active = %active, "Ledger reconciled");
    Ok(entries)
}

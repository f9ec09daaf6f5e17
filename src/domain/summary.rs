//! Headline figures for a project card.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::LadderError;
use super::ladder::{stake_progress, Ladder};
use super::money::{clamped_percent, Money, Percent};
use super::report::Breakdown;
use super::{Project, ProjectKind, Wager};

/// Summary of a project's owned wagers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub wager_count: u32,
    /// Profit of settled wagers only.
    pub settled_profit: Money,
    pub current_bankroll: Money,
    pub win_rate: Option<Percent>,
    /// Settled profit over the starting bankroll.
    pub roi: Option<Percent>,
    /// Recommended stake for the active cycle of a compounding project.
    pub working_stake: Option<Money>,
    /// Stake progress towards the cap, or bankroll progress towards the goal.
    pub progress: Percent,
}

impl ProjectSummary {
    /// Summarize the wagers in `wagers` that `project` owns.
    ///
    /// # Errors
    ///
    /// Returns a [`LadderError`] if the project's ladder cannot be built.
    pub fn compute(project: &Project, wagers: &[Wager]) -> Result<Self, LadderError> {
        let owned = project.owned(wagers);
        let totals = Breakdown::of(owned.iter().copied());
        let settled_profit: Money = owned
            .iter()
            .filter(|w| w.outcome.is_settled())
            .map(|w| w.profit)
            .sum();

        let start = project.kind().start_bankroll();
        let current_bankroll = start + settled_profit;
        let roi = (start > Decimal::ZERO).then(|| settled_profit / start * Decimal::ONE_HUNDRED);

        let (working_stake, progress) = match project.kind() {
            ProjectKind::GoalCompounding(plan) => {
                let active = project.active_cycle();
                let ladder = Ladder::build(plan, active.as_usize())?;
                let stake = ladder.working_stake(plan, active);
                (Some(stake), stake_progress(plan, stake))
            }
            ProjectKind::Standard { goal, .. } => {
                let progress = goal.map_or(Decimal::ZERO, |goal| {
                    clamped_percent(current_bankroll - start, goal - start)
                });
                (None, progress)
            }
        };

        Ok(Self {
            wager_count: totals.count,
            settled_profit,
            current_bankroll,
            win_rate: totals.win_rate(),
            roi,
            working_stake,
            progress,
        })
    }
}

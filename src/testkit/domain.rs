//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Wager`], [`Project`] and
//! timestamps so tests focus on assertions rather than construction
//! boilerplate. All wagers stake 10 and are dated at noon UTC.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    CycleIndex, Money, Outcome, Project, ProjectId, ProjectKind, StakingPlan, Wager, WagerId,
    WagerKind,
};

/// Fixed project start date.
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Noon UTC, `day` days after the start date.
pub fn day(day: u32) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_default();
    base + Duration::days(i64::from(day))
}

/// A won (or lost, for negative profit) wager with no cycle index.
pub fn wager_on(on_day: u32, profit: Money) -> Wager {
    let outcome = if profit > Decimal::ZERO {
        Outcome::Won
    } else if profit < Decimal::ZERO {
        Outcome::Lost
    } else {
        Outcome::Void
    };
    Wager {
        id: WagerId::new(format!("w-{on_day}-{profit}")),
        date: day(on_day),
        event: "Home vs Away".to_string(),
        market: "UNDER 2.5 FT".to_string(),
        kind: WagerKind::Back,
        odds: Decimal::TWO,
        stake: Decimal::TEN,
        profit,
        outcome,
        methodology: None,
        tags: Vec::new(),
        league: None,
        team: None,
        project_id: None,
        cycle_index: None,
    }
}

/// A wager at an exact timestamp.
pub fn wager_at(date: DateTime<Utc>) -> Wager {
    Wager {
        date,
        ..wager_on(0, Decimal::ONE)
    }
}

/// A wager attributed to `cycle`.
pub fn wager_in_cycle(cycle: u32, on_day: u32, profit: Money) -> Wager {
    Wager {
        cycle_index: Some(CycleIndex::new(cycle)),
        ..wager_on(on_day, profit)
    }
}

/// Override the outcome of a wager.
pub fn settled(wager: Wager, outcome: Outcome) -> Wager {
    Wager { outcome, ..wager }
}

/// Link a wager to a project explicitly.
pub fn for_project(wager: Wager, project: &ProjectId) -> Wager {
    Wager {
        project_id: Some(project.clone()),
        ..wager
    }
}

/// `days` wagers in `cycle`, one per distinct day starting at `first_day`.
pub fn active_days(cycle: u32, first_day: u32, days: u32, profit: Money) -> Vec<Wager> {
    (first_day..first_day + days)
        .map(|d| wager_in_cycle(cycle, d, profit))
        .collect()
}

/// A compounding project `p-ladder` at its first cycle.
pub fn compounding_project(start: Money, division: u32, cap: Option<Money>) -> Project {
    let plan = StakingPlan::try_new(start, division, cap)
        .unwrap_or_else(|e| panic!("invalid test plan: {e}"));
    Project::new(
        ProjectId::new("p-ladder"),
        "Ladder",
        start_date(),
        Some("ladder"),
        ProjectKind::GoalCompounding(plan),
    )
}

/// A standard project `p-standard` without a target.
pub fn standard_project(start: Money) -> Project {
    Project::new(
        ProjectId::new("p-standard"),
        "Standard",
        start_date(),
        None,
        ProjectKind::Standard {
            goal: None,
            start_bankroll: start,
        },
    )
}

/// A standard project `p-standard` with a target bankroll.
pub fn standard_project_with_goal(start: Money, goal: Money) -> Project {
    Project::new(
        ProjectId::new("p-standard"),
        "Standard",
        start_date(),
        None,
        ProjectKind::Standard {
            goal: Some(goal),
            start_bankroll: start,
        },
    )
}

//! Betting projects and their staking plans.
//!
//! A [`Project`] is a snapshot owned by the bookkeeping store. The only
//! mutation the ledger performs on it is moving the active cycle forward,
//! which goes through the advancement gate (see [`crate::domain::gate`]).

use std::num::NonZeroU32;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::{CycleIndex, Money, ProjectId, Wager};

/// Default number of stake units a bankroll is divided into.
pub const DEFAULT_DIVISION: u32 = 10;

/// Configuration of a goal-based compounding ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStakingPlan")]
pub struct StakingPlan {
    start_bankroll: Money,
    bankroll_division: NonZeroU32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stake_goal_cap: Option<Money>,
}

impl StakingPlan {
    /// Create a validated staking plan.
    ///
    /// A cap of zero is stored as "uncapped".
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidDivision`] for a division of zero and
    /// [`DomainError::NegativeStakeCap`] for a negative cap.
    pub fn try_new(
        start_bankroll: Money,
        bankroll_division: u32,
        stake_goal_cap: Option<Money>,
    ) -> Result<Self, DomainError> {
        let division = NonZeroU32::new(bankroll_division).ok_or(DomainError::InvalidDivision {
            division: bankroll_division,
        })?;
        if let Some(cap) = stake_goal_cap {
            if cap < Decimal::ZERO {
                return Err(DomainError::NegativeStakeCap { cap });
            }
        }
        Ok(Self {
            start_bankroll,
            bankroll_division: division,
            stake_goal_cap: stake_goal_cap.filter(|cap| !cap.is_zero()),
        })
    }

    #[must_use]
    pub fn start_bankroll(&self) -> Money {
        self.start_bankroll
    }

    #[must_use]
    pub fn division(&self) -> NonZeroU32 {
        self.bankroll_division
    }

    /// The stake cap, `None` when the ladder is uncapped.
    #[must_use]
    pub fn stake_goal_cap(&self) -> Option<Money> {
        self.stake_goal_cap
    }

    /// Stake of the very first step, before any growth.
    #[must_use]
    pub fn initial_stake(&self) -> Money {
        self.start_bankroll / Decimal::from(self.bankroll_division.get())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStakingPlan {
    start_bankroll: Money,
    #[serde(default = "default_division")]
    bankroll_division: u32,
    #[serde(default)]
    stake_goal_cap: Option<Money>,
}

const fn default_division() -> u32 {
    DEFAULT_DIVISION
}

impl TryFrom<RawStakingPlan> for StakingPlan {
    type Error = DomainError;

    fn try_from(raw: RawStakingPlan) -> Result<Self, Self::Error> {
        Self::try_new(raw.start_bankroll, raw.bankroll_division, raw.stake_goal_cap)
    }
}

/// Kind of project and its kind-specific configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "projectType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectKind {
    /// Plain bankroll tracking towards an optional target bankroll.
    Standard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        goal: Option<Money>,
        #[serde(rename = "startBankroll")]
        start_bankroll: Money,
    },
    /// Goal-based compounding over a staking ladder.
    #[serde(alias = "BALIZA_ZERO")]
    GoalCompounding(StakingPlan),
}

impl ProjectKind {
    /// The staking plan, for compounding projects.
    #[must_use]
    pub fn plan(&self) -> Option<&StakingPlan> {
        match self {
            ProjectKind::GoalCompounding(plan) => Some(plan),
            ProjectKind::Standard { .. } => None,
        }
    }

    /// Initial capital regardless of kind.
    #[must_use]
    pub fn start_bankroll(&self) -> Money {
        match self {
            ProjectKind::Standard { start_bankroll, .. } => *start_bankroll,
            ProjectKind::GoalCompounding(plan) => plan.start_bankroll(),
        }
    }
}

/// A user's betting project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    id: ProjectId,
    name: String,
    start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
    #[serde(flatten)]
    kind: ProjectKind,
    #[serde(default, alias = "activeDezenaIndex")]
    active_cycle_index: CycleIndex,
}

impl Project {
    /// Create a project whose first cycle is active.
    ///
    /// Tags are stored trimmed and lowercased.
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        start_date: NaiveDate,
        tag: Option<&str>,
        kind: ProjectKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            start_date,
            tag: tag
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty()),
            kind,
            active_cycle_index: CycleIndex::ZERO,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> &ProjectKind {
        &self.kind
    }

    /// The staking plan, for compounding projects.
    #[must_use]
    pub fn plan(&self) -> Option<&StakingPlan> {
        self.kind.plan()
    }

    /// Cycle currently accepting wagers.
    #[must_use]
    pub fn active_cycle(&self) -> CycleIndex {
        self.active_cycle_index
    }

    /// Returns true if the wager belongs to this project, either by explicit
    /// linkage or by carrying the project tag.
    #[must_use]
    pub fn owns(&self, wager: &Wager) -> bool {
        if wager.project_id.as_ref() == Some(&self.id) {
            return true;
        }
        self.tag.as_deref().is_some_and(|tag| wager.has_tag(tag))
    }

    /// Filter a wager collection down to the wagers this project owns.
    pub fn owned<'a>(&self, wagers: &'a [Wager]) -> Vec<&'a Wager> {
        wagers.iter().filter(|w| self.owns(w)).collect()
    }

    /// Snapshot with the next cycle active. Everything else is unchanged.
    pub(crate) fn advanced(&self) -> Self {
        Self {
            active_cycle_index: self.active_cycle_index.next(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WagerId;
    use crate::domain::{Outcome, WagerKind};
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn compounding() -> Project {
        Project::new(
            ProjectId::new("p-1"),
            "Ladder",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Some("  Baliza "),
            ProjectKind::GoalCompounding(StakingPlan::try_new(dec!(100), 10, None).unwrap()),
        )
    }

    fn wager(project: Option<&str>, tags: &[&str]) -> Wager {
        Wager {
            id: WagerId::new("w"),
            date: Utc.with_ymd_and_hms(2025, 1, 2, 12, 0, 0).unwrap(),
            event: String::new(),
            market: String::new(),
            kind: WagerKind::Back,
            odds: dec!(2),
            stake: dec!(10),
            profit: dec!(10),
            outcome: Outcome::Won,
            methodology: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            league: None,
            team: None,
            project_id: project.map(ProjectId::new),
            cycle_index: None,
        }
    }

    #[test]
    fn zero_division_is_rejected() {
        let result = StakingPlan::try_new(dec!(100), 0, None);
        assert_eq!(result, Err(DomainError::InvalidDivision { division: 0 }));
    }

    #[test]
    fn negative_cap_is_rejected() {
        let result = StakingPlan::try_new(dec!(100), 10, Some(dec!(-1)));
        assert!(matches!(result, Err(DomainError::NegativeStakeCap { .. })));
    }

    #[test]
    fn zero_cap_means_uncapped() {
        let plan = StakingPlan::try_new(dec!(100), 10, Some(Decimal::ZERO)).unwrap();
        assert_eq!(plan.stake_goal_cap(), None);
    }

    #[test]
    fn initial_stake_divides_bankroll() {
        let plan = StakingPlan::try_new(dec!(250), 5, Some(dec!(100))).unwrap();
        assert_eq!(plan.initial_stake(), dec!(50));
    }

    #[test]
    fn new_project_starts_at_first_cycle_with_normalized_tag() {
        let project = compounding();
        assert_eq!(project.active_cycle(), CycleIndex::ZERO);
        assert_eq!(project.tag(), Some("baliza"));
    }

    #[test]
    fn advanced_moves_exactly_one_cycle() {
        let project = compounding();
        let next = project.advanced();
        assert_eq!(next.active_cycle(), CycleIndex::new(1));
        assert_eq!(next.plan(), project.plan());
        assert_eq!(next.name(), project.name());
    }

    #[test]
    fn owns_by_linkage_or_tag() {
        let project = compounding();
        assert!(project.owns(&wager(Some("p-1"), &[])));
        assert!(project.owns(&wager(None, &["BALIZA"])));
        assert!(!project.owns(&wager(Some("p-2"), &["other"])));
    }

    #[test]
    fn owns_accented_tag_in_any_case() {
        let project = Project::new(
            ProjectId::new("p-acao"),
            "Ação",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            Some("Ação"),
            ProjectKind::GoalCompounding(StakingPlan::try_new(dec!(100), 10, None).unwrap()),
        );
        assert_eq!(project.tag(), Some("ação"));
        assert!(project.owns(&wager(None, &["AÇÃO"])));
        assert!(project.owns(&wager(None, &["Ação"])));
        assert!(!project.owns(&wager(None, &["acao"])));
    }

    #[test]
    fn deserializes_store_record() {
        let json = r#"{
            "id": "p-9",
            "name": "Zero",
            "startDate": "2025-02-01",
            "projectType": "BALIZA_ZERO",
            "startBankroll": 100,
            "stakeGoalCap": 0,
            "activeDezenaIndex": 3
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        let plan = project.plan().unwrap();

        assert_eq!(plan.division().get(), DEFAULT_DIVISION);
        assert_eq!(plan.stake_goal_cap(), None);
        assert_eq!(project.active_cycle(), CycleIndex::new(3));
    }

    #[test]
    fn rejects_zero_division_in_store_record() {
        let json = r#"{
            "id": "p-9",
            "name": "Zero",
            "startDate": "2025-02-01",
            "projectType": "GOAL_COMPOUNDING",
            "startBankroll": 100,
            "bankrollDivision": 0
        }"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }
}

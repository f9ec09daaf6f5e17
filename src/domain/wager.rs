//! Wager records supplied by the bookkeeping store or an importer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CycleIndex, Money, ProjectId, WagerId};

/// Settlement state of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Won,
    Lost,
    Void,
    /// Not yet settled; profit is zero by convention until settlement.
    Pending,
}

impl Outcome {
    /// Returns true once the wager has been settled.
    #[must_use]
    pub fn is_settled(self) -> bool {
        !matches!(self, Outcome::Pending)
    }
}

/// Exchange side of a wager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WagerKind {
    #[default]
    Back,
    Lay,
}

/// A single recorded bet.
///
/// Immutable once settled apart from the classification fields
/// (`methodology`, `tags`, `league`, `team`, `project_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wager {
    pub id: WagerId,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub market: String,
    #[serde(default, rename = "type")]
    pub kind: WagerKind,
    #[serde(default)]
    pub odds: Money,
    pub stake: Money,
    pub profit: Money,
    #[serde(alias = "status")]
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub league: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_index: Option<CycleIndex>,
}

impl Wager {
    /// The cycle this wager is attributed to, defaulting to the first one.
    #[must_use]
    pub fn cycle(&self) -> CycleIndex {
        self.cycle_index.unwrap_or(CycleIndex::ZERO)
    }

    /// Returns true if the wager lost.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.outcome == Outcome::Lost
    }

    /// Returns true if the wager carries `tag`, compared case-insensitively
    /// under Unicode lowercasing.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

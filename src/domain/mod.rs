//! Pure ledger logic over project and wager snapshots.
//!
//! Nothing in this module performs I/O or holds shared state: every function
//! takes immutable inputs and returns new derived values, so results can be
//! recomputed or memoized freely.

pub mod cycle;
pub mod error;
pub mod gate;
pub mod id;
pub mod ladder;
pub mod money;
pub mod project;
pub mod reconcile;
pub mod report;
pub mod summary;
pub mod wager;

pub use cycle::CycleGroups;
pub use gate::{Advancement, AdvancementGate, GateStatus};
pub use id::{CycleIndex, ProjectId, WagerId};
pub use ladder::{Ladder, PlannedStep};
pub use money::{Money, Percent};
pub use project::{Project, ProjectKind, StakingPlan};
pub use reconcile::{reconcile, CycleLedgerEntry, CycleStatus};
pub use report::Breakdown;
pub use summary::ProjectSummary;
pub use wager::{Outcome, Wager, WagerKind};

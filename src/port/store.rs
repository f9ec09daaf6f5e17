//! Persistence port for projects and wagers.

use crate::domain::{CycleIndex, Project, ProjectId, Wager};
use crate::error::Result;

/// Storage operations for the betting book.
///
/// Reads return owned snapshots. The only project mutation the ledger
/// performs goes through [`BookStore::advance_project`], which must be
/// atomic with respect to concurrent advances of the same project.
pub trait BookStore: Send + Sync {
    /// Get a project by ID.
    fn project(&self, id: &ProjectId) -> Result<Option<Project>>;

    /// List all projects, ordered by ID.
    fn projects(&self) -> Result<Vec<Project>>;

    /// List all wagers in insertion order.
    fn wagers(&self) -> Result<Vec<Wager>>;

    /// Save a project, replacing if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CycleRegression`](crate::error::StoreError::CycleRegression)
    /// if the stored project is already on a later cycle.
    fn save_project(&self, project: &Project) -> Result<()>;

    /// Append a wager, replacing any wager with the same ID.
    fn record_wager(&self, wager: &Wager) -> Result<()>;

    /// Replace the stored project with `next` if its active cycle still
    /// equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`](crate::error::StoreError::NotFound)
    /// for an unknown project and
    /// [`StoreError::Conflict`](crate::error::StoreError::Conflict) when
    /// another writer advanced the project first.
    fn advance_project(&self, id: &ProjectId, expected: CycleIndex, next: &Project) -> Result<()>;
}

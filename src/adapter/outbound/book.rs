//! In-memory book document shared by the store adapters.

use serde::{Deserialize, Serialize};

use crate::domain::{CycleIndex, Project, ProjectId, Wager};
use crate::error::{Result, StoreError};

/// Every project and wager of one bettor.
///
/// Serialized as `{ "projects": [...], "wagers": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub wagers: Vec<Wager>,
}

impl Book {
    /// Create a book from existing records.
    #[must_use]
    pub fn new(projects: Vec<Project>, wagers: Vec<Wager>) -> Self {
        Self { projects, wagers }
    }

    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// Projects sorted by ID.
    #[must_use]
    pub fn sorted_projects(&self) -> Vec<Project> {
        let mut projects = self.projects.clone();
        projects.sort_by(|a, b| a.id().cmp(b.id()));
        projects
    }

    /// Insert or replace a project.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CycleRegression`] if the stored snapshot is on a
    /// later cycle than `project`.
    pub fn upsert_project(&mut self, project: &Project) -> Result<()> {
        match self.projects.iter_mut().find(|p| p.id() == project.id()) {
            Some(slot) if slot.active_cycle() > project.active_cycle() => {
                Err(StoreError::CycleRegression {
                    project: project.id().clone(),
                    stored: slot.active_cycle(),
                    incoming: project.active_cycle(),
                }
                .into())
            }
            Some(slot) => {
                *slot = project.clone();
                Ok(())
            }
            None => {
                self.projects.push(project.clone());
                Ok(())
            }
        }
    }

    pub fn upsert_wager(&mut self, wager: &Wager) {
        match self.wagers.iter_mut().find(|w| w.id == wager.id) {
            Some(slot) => *slot = wager.clone(),
            None => self.wagers.push(wager.clone()),
        }
    }

    /// Compare-and-swap the project's active cycle.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] or [`StoreError::Conflict`].
    pub fn advance(&mut self, id: &ProjectId, expected: CycleIndex, next: &Project) -> Result<()> {
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let stored = slot.active_cycle();
        if stored != expected {
            return Err(StoreError::Conflict {
                project: id.clone(),
                expected,
                stored,
            }
            .into());
        }

        *slot = next.clone();
        Ok(())
    }
}

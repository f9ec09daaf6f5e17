//! Ledger use cases over a book store.
//!
//! Loads one consistent snapshot of a project and its wagers, runs the pure
//! ledger pipeline over it, and writes back the only mutation the ledger
//! makes: moving the active cycle forward.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{
    reconcile, Advancement, AdvancementGate, CycleGroups, CycleLedgerEntry, GateStatus, Ladder,
    Project, ProjectId, ProjectSummary, Wager,
};
use crate::error::{Result, StoreError};
use crate::port::BookStore;

/// Everything the ledger derives for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectLedger {
    pub project: Project,
    pub summary: ProjectSummary,
    /// Planned ladder; `None` for standard projects.
    pub ladder: Option<Ladder>,
    /// One reconciled entry per cycle from zero through the active one.
    pub entries: Vec<CycleLedgerEntry>,
    /// Activity of the active cycle; `None` for standard projects.
    pub gate: Option<GateStatus>,
}

/// Ledger service bound to a store and an advancement gate.
pub struct LedgerService<S> {
    store: Arc<S>,
    gate: AdvancementGate,
}

impl<S> Clone for LedgerService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            gate: self.gate,
        }
    }
}

impl<S: BookStore> LedgerService<S> {
    /// Create a new ledger service.
    pub fn new(store: Arc<S>, gate: AdvancementGate) -> Self {
        Self { store, gate }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn gate(&self) -> &AdvancementGate {
        &self.gate
    }

    fn load(&self, id: &ProjectId) -> Result<Project> {
        self.store
            .project(id)?
            .ok_or_else(|| StoreError::NotFound(id.clone()).into())
    }

    /// Derive the full ledger view of a project.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is unknown, the store cannot be read,
    /// or the project's staking plan cannot produce a ladder.
    pub fn view(&self, id: &ProjectId) -> Result<ProjectLedger> {
        let project = self.load(id)?;
        let wagers = self.store.wagers()?;
        let summary = ProjectSummary::compute(&project, &wagers)?;

        let Some(plan) = project.plan() else {
            return Ok(ProjectLedger {
                project,
                summary,
                ladder: None,
                entries: Vec::new(),
                gate: None,
            });
        };

        let active = project.active_cycle();
        let ladder = Ladder::build(plan, active.as_usize())?;
        let groups = CycleGroups::assign(project.owned(&wagers), active);
        let entries = reconcile(&ladder, &groups, active)?;
        let gate = self.gate.status(&project, groups.get(active));

        debug!(
            project = %project.id(),
            cycles = entries.len(),
            active_days = gate.active_days,
            "Ledger computed"
        );

        Ok(ProjectLedger {
            project,
            summary,
            ladder: Some(ladder),
            entries,
            gate: Some(gate),
        })
    }

    /// Close the active cycle of a project if the gate allows it.
    ///
    /// The write is a compare-and-swap on the cycle read from the snapshot,
    /// so of two racing advances only one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the project was advanced
    /// concurrently, or any store error.
    pub fn advance(&self, id: &ProjectId) -> Result<Advancement> {
        let project = self.load(id)?;
        let wagers = self.store.wagers()?;
        let active = project.active_cycle();
        let groups = CycleGroups::assign(project.owned(&wagers), active);

        let outcome = self.gate.advance(&project, groups.get(active));
        if let Advancement::Advanced(next) = &outcome {
            self.store.advance_project(id, active, next)?;
            info!(project = %id, cycle = %next.active_cycle(), "Advancement persisted");
        }
        Ok(outcome)
    }

    /// Record a wager, attributing it to the active cycle of the
    /// compounding project that owns it when no cycle is set.
    ///
    /// An explicit project link wins over tags. When only tags match and
    /// several compounding projects share the tag, the one with the lowest
    /// ID is used.
    ///
    /// # Errors
    ///
    /// Returns any store error.
    pub fn record_wager(&self, wager: Wager) -> Result<Wager> {
        let mut wager = wager;
        if wager.cycle_index.is_none() {
            let owners: Vec<Project> = self
                .store
                .projects()?
                .into_iter()
                .filter(|p| p.plan().is_some() && p.owns(&wager))
                .collect();
            let linked = owners
                .iter()
                .find(|p| wager.project_id.as_ref() == Some(p.id()));
            if linked.is_none() && owners.len() > 1 {
                warn!(
                    wager = %wager.id,
                    candidates = owners.len(),
                    owner = %owners[0].id(),
                    "Tag matches several compounding projects"
                );
            }
            if let Some(project) = linked.or_else(|| owners.first()) {
                wager.cycle_index = Some(project.active_cycle());
            }
        }
        self.store.record_wager(&wager)?;
        debug!(wager = %wager.id, cycle = ?wager.cycle_index, "Wager recorded");
        Ok(wager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::{Book, MemoryStore};
    use crate::domain::CycleIndex;
    use crate::error::Error;
    use crate::domain::{ProjectKind, StakingPlan, WagerId};
    use crate::testkit::domain::{
        active_days, compounding_project, for_project, standard_project, start_date, wager_on,
    };
    use rust_decimal_macros::dec;

    fn service(projects: Vec<Project>, wagers: Vec<Wager>) -> LedgerService<MemoryStore> {
        let store = MemoryStore::with_book(Book::new(projects, wagers));
        LedgerService::new(Arc::new(store), AdvancementGate::default())
    }

    #[test]
    fn view_of_unknown_project_is_not_found() {
        let svc = service(Vec::new(), Vec::new());
        let err = svc.view(&ProjectId::new("missing")).unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn standard_project_has_no_ladder() {
        let project = standard_project(dec!(100));
        let svc = service(vec![project.clone()], Vec::new());

        let ledger = svc.view(project.id()).unwrap();
        assert!(ledger.ladder.is_none());
        assert!(ledger.entries.is_empty());
        assert!(ledger.gate.is_none());
    }

    #[test]
    fn view_only_counts_owned_wagers() {
        let project = compounding_project(dec!(100), 10, Some(dec!(20)));
        let owned = for_project(wager_on(1, dec!(12)), project.id());
        let foreign = wager_on(2, dec!(500));
        let svc = service(vec![project.clone()], vec![owned, foreign]);

        let ledger = svc.view(project.id()).unwrap();
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.entries[0].raw_profit, dec!(12));
        assert_eq!(ledger.gate.unwrap().active_days, 1);
    }

    #[test]
    fn advance_persists_next_cycle() {
        let project = compounding_project(dec!(100), 10, None);
        let wagers = active_days(0, 0, 10, dec!(3))
            .into_iter()
            .map(|w| for_project(w, project.id()))
            .collect();
        let svc = service(vec![project.clone()], wagers);

        let outcome = svc.advance(project.id()).unwrap();
        assert!(outcome.is_advanced());

        let stored = svc.store().project(project.id()).unwrap().unwrap();
        assert_eq!(stored.active_cycle(), CycleIndex::new(1));
    }

    #[test]
    fn rejected_advance_leaves_store_untouched() {
        let project = compounding_project(dec!(100), 10, None);
        let wagers = active_days(0, 0, 9, dec!(3))
            .into_iter()
            .map(|w| for_project(w, project.id()))
            .collect();
        let svc = service(vec![project.clone()], wagers);

        let outcome = svc.advance(project.id()).unwrap();
        assert_eq!(
            outcome,
            Advancement::Rejected {
                active_days: 9,
                required: 10
            }
        );
        let stored = svc.store().project(project.id()).unwrap().unwrap();
        assert_eq!(stored, project);
    }

    #[test]
    fn record_wager_stamps_active_cycle() {
        let project = compounding_project(dec!(100), 10, None);
        let svc = service(vec![project.clone()], Vec::new());

        let recorded = svc
            .record_wager(for_project(wager_on(1, dec!(5)), project.id()))
            .unwrap();
        assert_eq!(recorded.cycle_index, Some(CycleIndex::ZERO));

        let unowned = svc.record_wager(wager_on(2, dec!(5))).unwrap();
        assert_eq!(unowned.cycle_index, None);
        assert_eq!(svc.store().wagers().unwrap().len(), 2);
    }

    #[test]
    fn shared_tag_prefers_link_then_lowest_id() {
        let ladder = compounding_project(dec!(100), 10, None).advanced();
        let alpha = Project::new(
            ProjectId::new("p-alpha"),
            "Alpha",
            start_date(),
            Some("ladder"),
            ProjectKind::GoalCompounding(StakingPlan::try_new(dec!(50), 10, None).unwrap()),
        );
        let svc = service(vec![ladder.clone(), alpha], Vec::new());

        let mut tagged = wager_on(1, dec!(5));
        tagged.tags.push("Ladder".to_string());
        let by_tag = svc.record_wager(tagged.clone()).unwrap();
        assert_eq!(by_tag.cycle_index, Some(CycleIndex::ZERO));

        tagged.id = WagerId::new("w-linked");
        let linked = svc.record_wager(for_project(tagged, ladder.id())).unwrap();
        assert_eq!(linked.cycle_index, Some(CycleIndex::new(1)));
    }
}

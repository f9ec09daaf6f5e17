//! Partitioning of a wager history into ladder cycles.

use std::collections::BTreeMap;

use super::{CycleIndex, Wager};

/// Wagers grouped by their stored cycle index.
///
/// Every cycle from zero through the active one is present, even when empty.
/// Wagers attributed beyond the active cycle keep their own groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleGroups {
    groups: BTreeMap<CycleIndex, Vec<Wager>>,
}

impl CycleGroups {
    /// Group `wagers` by cycle, ordering each group by date ascending.
    ///
    /// Order among wagers with the same timestamp is unspecified.
    pub fn assign<'a, I>(wagers: I, active: CycleIndex) -> Self
    where
        I: IntoIterator<Item = &'a Wager>,
    {
        let mut groups: BTreeMap<CycleIndex, Vec<Wager>> =
            active.through().map(|i| (i, Vec::new())).collect();

        for wager in wagers {
            groups.entry(wager.cycle()).or_default().push(wager.clone());
        }
        for group in groups.values_mut() {
            group.sort_unstable_by_key(|w| w.date);
        }

        Self { groups }
    }

    /// Wagers attributed to `cycle`; empty if none were recorded.
    #[must_use]
    pub fn get(&self, cycle: CycleIndex) -> &[Wager] {
        self.groups.get(&cycle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate groups in cycle order.
    pub fn iter(&self) -> impl Iterator<Item = (CycleIndex, &[Wager])> {
        self.groups.iter().map(|(i, g)| (*i, g.as_slice()))
    }

    /// Number of groups, including empty ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

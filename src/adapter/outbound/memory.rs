//! Thread-safe in-memory book store.

use parking_lot::RwLock;

use super::book::Book;
use crate::domain::{CycleIndex, Project, ProjectId, Wager};
use crate::error::Result;
use crate::port::BookStore;

/// Book store backed by a lock-guarded [`Book`].
///
/// The write lock is held for the whole compare-and-swap, so concurrent
/// advances of the same project serialize and all but one see a conflict.
#[derive(Debug, Default)]
pub struct MemoryStore {
    book: RwLock<Book>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `book`.
    #[must_use]
    pub fn with_book(book: Book) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Snapshot of the whole book.
    #[must_use]
    pub fn snapshot(&self) -> Book {
        self.book.read().clone()
    }
}

impl BookStore for MemoryStore {
    fn project(&self, id: &ProjectId) -> Result<Option<Project>> {
        Ok(self.book.read().project(id).cloned())
    }

    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.book.read().sorted_projects())
    }

    fn wagers(&self) -> Result<Vec<Wager>> {
        Ok(self.book.read().wagers.clone())
    }

    fn save_project(&self, project: &Project) -> Result<()> {
        self.book.write().upsert_project(project)
    }

    fn record_wager(&self, wager: &Wager) -> Result<()> {
        self.book.write().upsert_wager(wager);
        Ok(())
    }

    fn advance_project(&self, id: &ProjectId, expected: CycleIndex, next: &Project) -> Result<()> {
        self.book.write().advance(id, expected, next)
    }
}

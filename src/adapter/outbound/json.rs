//! Book store persisted as a single JSON document.
//!
//! Every operation re-reads the file so that edits made by other tools
//! between commands are honored. Writes go to a sibling temporary file
//! which is then renamed over the original.
//!
//! Read-modify-write cycles are serialized by an in-process mutex only.
//! Two processes updating the same file concurrently can lose an update,
//! and the compare-and-swap on advancement holds within one process.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::book::Book;
use crate::domain::{CycleIndex, Project, ProjectId, Wager};
use crate::error::{Result, StoreError};
use crate::port::BookStore;

/// JSON file-backed book store.
#[derive(Debug)]
pub struct JsonBookStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonBookStore {
    /// Open a store at `path`. A missing file reads as an empty book.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Book> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Book::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Book::default());
        }
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())).into())
    }

    fn write(&self, book: &Book) -> Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let content = serde_json::to_string_pretty(book)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            path = %self.path.display(),
            projects = book.projects.len(),
            wagers = book.wagers.len(),
            "Book written"
        );
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Book) -> Result<()>,
    {
        let _guard = self.lock.lock();
        let mut book = self.read()?;
        apply(&mut book)?;
        self.write(&book)
    }
}

impl BookStore for JsonBookStore {
    fn project(&self, id: &ProjectId) -> Result<Option<Project>> {
        let _guard = self.lock.lock();
        Ok(self.read()?.project(id).cloned())
    }

    fn projects(&self) -> Result<Vec<Project>> {
        let _guard = self.lock.lock();
        Ok(self.read()?.sorted_projects())
    }

    fn wagers(&self) -> Result<Vec<Wager>> {
        let _guard = self.lock.lock();
        Ok(self.read()?.wagers)
    }

    fn save_project(&self, project: &Project) -> Result<()> {
        self.update(|book| book.upsert_project(project))
    }

    fn record_wager(&self, wager: &Wager) -> Result<()> {
        self.update(|book| {
            book.upsert_wager(wager);
            Ok(())
        })
    }

    fn advance_project(&self, id: &ProjectId, expected: CycleIndex, next: &Project) -> Result<()> {
        self.update(|book| book.advance(id, expected, next))
    }
}

//! Canonical test configurations.
//!
//! Single source of truth for config documents used across tests.

use std::fs;
use std::path::{Path, PathBuf};

use crate::adapter::outbound::Book;

/// Minimal valid config pointing at `book`, with quiet logging.
pub fn toml_for_book(book: &Path) -> String {
    format!(
        "book = {:?}\n\n[logging]\nlevel = \"error\"\nformat = \"pretty\"\n\n[gate]\nmin_active_days = 10\n",
        book.display().to_string()
    )
}

/// Write `content` as `stakeladder.toml` inside `dir`.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("stakeladder.toml");
    fs::write(&path, content).unwrap_or_else(|e| panic!("write config: {e}"));
    path
}

/// Write `book` as `book.json` inside `dir`.
pub fn write_book(dir: &Path, book: &Book) -> PathBuf {
    let path = dir.join("book.json");
    let content = serde_json::to_string_pretty(book).unwrap_or_else(|e| panic!("encode: {e}"));
    fs::write(&path, content).unwrap_or_else(|e| panic!("write book: {e}"));
    path
}

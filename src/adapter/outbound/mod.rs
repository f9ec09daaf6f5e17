//! Outbound adapters (driven side).

pub mod book;
pub mod json;
pub mod memory;

pub use book::Book;
pub use json::JsonBookStore;
pub use memory::MemoryStore;

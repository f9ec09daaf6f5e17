//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points the ledger needs from the outside
//! world. The ledger itself never performs I/O; the application layer reads
//! snapshots through a port, hands them to the pure domain functions, and
//! writes the single permitted mutation back.
//!
//! ```text
//!     ┌──────────────┐        ┌──────────────────┐
//!     │  CLI adapter ├───────►│   Application    │
//!     └──────────────┘        │  (LedgerService) │
//!                             └────────┬─────────┘
//!                                      │ BookStore
//!                        ┌─────────────┴─────────────┐
//!                        ▼                           ▼
//!                 ┌─────────────┐             ┌─────────────┐
//!                 │ MemoryStore │             │JsonBookStore│
//!                 └─────────────┘             └─────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`BookStore`] - Projects, wagers, and the guarded cycle advance

pub mod store;

pub use store::BookStore;

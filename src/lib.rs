//! Stakeladder - goal-based compounding ledger for betting projects.
//!
//! A compounding project divides its bankroll into stake units and works
//! through a ladder of cycles. Each cycle has a planned stake and a profit
//! goal of two and a half stakes; reaching it grows the bank the next cycle
//! stakes from. This crate plans that ladder, reconciles realized results
//! against it with surplus carry-over, gates advancement on betting
//! activity, and rolls wagers up by market, league, team and methodology.
//!
//! # Architecture
//!
//! - **`domain`** - Pure ledger logic over immutable snapshots
//! - **`port`** - The [`port::BookStore`] persistence trait
//! - **`adapter`** - JSON file and in-memory stores, and the CLI
//! - **`application`** - [`application::LedgerService`] use cases
//! - **`infrastructure`** - Configuration, logging and wiring
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use stakeladder::domain::{Ladder, StakingPlan};
//!
//! let plan = StakingPlan::try_new(dec!(100), 10, Some(dec!(20))).unwrap();
//! let ladder = Ladder::build(&plan, 0).unwrap();
//!
//! assert_eq!(ladder.steps()[0].planned_stake, dec!(10));
//! assert_eq!(ladder.steps()[0].planned_goal, dec!(25));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

/// Shared test utilities (builders, canonical configs).
///
/// Available in unit tests via `#[cfg(test)]` and in integration tests
/// via the `testkit` feature.
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

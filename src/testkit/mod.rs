//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for domain primitives: wagers, projects, dates.
//! - [`config`] - Canonical TOML configurations and temp-file helpers.

pub mod config;
pub mod domain;

//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors and by the ladder and
//! reconciliation functions.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use stakeladder::domain::error::DomainError;
//! use stakeladder::domain::StakingPlan;
//! use rust_decimal_macros::dec;
//!
//! // A division of zero cannot split a bankroll into stakes
//! let result = StakingPlan::try_new(dec!(100), 0, None);
//!
//! assert!(matches!(result, Err(DomainError::InvalidDivision { division: 0 })));
//! ```

use thiserror::Error;

use super::CycleIndex;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The bankroll must be divided into at least one stake unit.
    #[error("bankroll division must be at least 1, got {division}")]
    InvalidDivision {
        /// The invalid division that was provided.
        division: u32,
    },

    /// A stake cap must not be negative.
    #[error("stake goal cap must be 0 or greater, got {cap}")]
    NegativeStakeCap {
        /// The invalid cap.
        cap: rust_decimal::Decimal,
    },

    /// The ladder handed to the reconciler stops before the active cycle.
    #[error("ladder has {len} steps but cycle {active} is active")]
    LadderTooShort {
        /// Number of planned steps available.
        len: usize,
        /// The active cycle that needs a planned step.
        active: CycleIndex,
    },
}

/// Fatal configuration errors raised while materializing a ladder.
///
/// Both variants mean the staking plan cannot produce a finite, representable
/// ladder covering the requested cycles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LadderError {
    /// No stop condition was met within the safety bound.
    #[error("ladder did not terminate within {bound} steps")]
    Unbounded {
        /// The iteration ceiling that was hit.
        bound: usize,
    },

    /// Bank growth exceeded the decimal range.
    #[error("ladder arithmetic overflowed at step {index}")]
    Overflow {
        /// Step at which the overflow occurred.
        index: usize,
    },
}

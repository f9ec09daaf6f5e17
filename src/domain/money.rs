//! Monetary types for bankroll, stake and profit representation.

use rust_decimal::Decimal;

/// Money represented as a Decimal for precision.
pub type Money = Decimal;

/// Percentage in the 0..=100 range, also a Decimal.
pub type Percent = Decimal;

/// Compute `part / whole * 100` clamped to `0..=100`, or zero when `whole` is not positive.
#[must_use]
pub fn clamped_percent(part: Money, whole: Money) -> Percent {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

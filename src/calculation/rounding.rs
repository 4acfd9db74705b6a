//! Monetary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a value to two decimal places, halves away from zero.
///
/// This matches the spreadsheet `ROUND` function. Every intermediate value
/// the calculator rounds goes through here. The result always carries two
/// decimal places, so `12` is returned as `12.00`.
///
/// # Example
///
/// ```
/// use diaria_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("256.015").unwrap()), Decimal::from_str("256.02").unwrap());
/// assert_eq!(round_money(Decimal::from_str("0.125").unwrap()), Decimal::from_str("0.13").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

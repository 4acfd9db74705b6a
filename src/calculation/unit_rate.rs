//! Unit rate (K) calculation.
//!
//! K is the value of one full day: the tenure-adjusted base daily rate for
//! the rank, raised to the location floor when it falls below it.

use rust_decimal::Decimal;

use crate::config::DiariaConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Destination};

use super::round_money;

/// The result of computing the unit rate.
#[derive(Debug, Clone)]
pub struct UnitRateResult {
    /// The resolved rank code.
    pub rank: String,
    /// Base daily rate for the rank.
    pub base_daily_rate: Decimal,
    /// J: round(H × base daily rate, 2).
    pub adjusted_rate: Decimal,
    /// Floor for the destination class.
    pub floor: Decimal,
    /// K: the unit rate.
    pub unit_rate: Decimal,
    /// True when the floor replaced the adjusted rate.
    pub floor_applied: bool,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

/// Computes K = round(max(floor, round(H × base daily rate, 2)), 2).
///
/// # Errors
///
/// Returns `UnknownRate` when the rank has no base daily rate, and
/// `AmountOverflow` when H × base daily rate leaves the decimal range.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::calculate_unit_rate;
/// use diaria_engine::config::DiariaConfig;
/// use diaria_engine::models::Destination;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
/// use std::str::FromStr;
///
/// let config = DiariaConfig::default().with_daily_rates(HashMap::from([(
///     "CAP".to_string(),
///     Decimal::from_str("509.22").unwrap(),
/// )]));
/// let result = calculate_unit_rate("CAP", Destination::Capital, Decimal::ONE, &config, 1).unwrap();
/// assert_eq!(result.unit_rate, Decimal::from_str("509.22").unwrap());
/// ```
pub fn calculate_unit_rate(
    rank: &str,
    destination: Destination,
    tenure_multiplier: Decimal,
    config: &DiariaConfig,
    step_number: u32,
) -> EngineResult<UnitRateResult> {
    let (code, base_daily_rate) = config.daily_rate(rank)?;
    let adjusted_rate = tenure_multiplier
        .checked_mul(base_daily_rate)
        .map(round_money)
        .ok_or_else(|| EngineError::AmountOverflow {
            operation: "adjusted rate".to_string(),
        })?;
    let floor = config.floors().floor_for(destination);
    let floor_applied = floor > adjusted_rate;
    let unit_rate = round_money(floor.max(adjusted_rate));

    let reasoning = if floor_applied {
        format!(
            "H {} × R$ {} = R$ {} is below the {} floor R$ {}; K = R$ {}",
            tenure_multiplier.normalize(),
            base_daily_rate,
            adjusted_rate,
            destination,
            floor,
            unit_rate
        )
    } else {
        format!(
            "H {} × R$ {} = R$ {} (floor for {} is R$ {}); K = R$ {}",
            tenure_multiplier.normalize(),
            base_daily_rate,
            adjusted_rate,
            destination,
            floor,
            unit_rate
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "unit_rate".to_string(),
        rule_name: "Unit Rate".to_string(),
        sheet_ref: "J:K".to_string(),
        input: serde_json::json!({
            "rank": code,
            "base_daily_rate": base_daily_rate.to_string(),
            "tenure_multiplier": tenure_multiplier.to_string(),
            "destination": destination
        }),
        output: serde_json::json!({
            "adjusted_rate": adjusted_rate.to_string(),
            "floor": floor.to_string(),
            "unit_rate": unit_rate.to_string(),
            "floor_applied": floor_applied
        }),
        reasoning,
    };

    Ok(UnitRateResult {
        rank: code,
        base_daily_rate,
        adjusted_rate,
        floor,
        unit_rate,
        floor_applied,
        audit_step,
    })
}

//! Total amount calculation.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning};

use super::round_money;

/// The result of computing the total, with the per-unit values.
#[derive(Debug, Clone)]
pub struct TotalResult {
    /// round(K/2 − allowance, 2).
    pub half_day_value: Decimal,
    /// round(K − allowance, 2).
    pub full_day_value: Decimal,
    /// round(K/2, 2).
    pub lodging_value: Decimal,
    /// The final amount.
    pub total: Decimal,
    /// Warnings raised by negative unit values.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

/// Computes the total amount.
///
/// `total = round(round(K/2 − a, 2) × M + round(K − a, 2) × L + round(K/2, 2) × N, 2)`
///
/// Each unit value is rounded before it is multiplied, which decides the
/// final cent and must not be collapsed into one rounding.
///
/// # Errors
///
/// Returns `AmountOverflow` when an intermediate value leaves the decimal
/// range.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::calculate_total;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let k = Decimal::from_str("661.99").unwrap();
/// let allowance = Decimal::from_str("74.98").unwrap();
/// let result = calculate_total(k, 4, 1, 0, allowance, 1).unwrap();
/// assert_eq!(result.total, Decimal::from_str("2604.06").unwrap());
/// ```
pub fn calculate_total(
    unit_rate: Decimal,
    full_day_units: u32,
    half_day_units: u32,
    lodging_units: u32,
    incidental_allowance: Decimal,
    step_number: u32,
) -> EngineResult<TotalResult> {
    let overflow = |operation: &str| EngineError::AmountOverflow {
        operation: operation.to_string(),
    };

    let k = round_money(unit_rate);
    let half_rate = k / Decimal::TWO;

    let half_day_value = half_rate
        .checked_sub(incidental_allowance)
        .map(round_money)
        .ok_or_else(|| overflow("half-day value"))?;
    let full_day_value = k
        .checked_sub(incidental_allowance)
        .map(round_money)
        .ok_or_else(|| overflow("full-day value"))?;
    let lodging_value = round_money(half_rate);

    let total = half_day_value
        .checked_mul(Decimal::from(half_day_units))
        .zip(full_day_value.checked_mul(Decimal::from(full_day_units)))
        .zip(lodging_value.checked_mul(Decimal::from(lodging_units)))
        .and_then(|((half, full), lodging)| half.checked_add(full)?.checked_add(lodging))
        .map(round_money)
        .ok_or_else(|| overflow("total"))?;

    let mut warnings = Vec::new();
    if half_day_value < Decimal::ZERO && half_day_units > 0 {
        warnings.push(AuditWarning {
            code: "NEGATIVE_HALF_DAY_VALUE".to_string(),
            message: format!(
                "Incidental allowance R$ {} exceeds half the unit rate R$ {}",
                incidental_allowance, lodging_value
            ),
            severity: "medium".to_string(),
        });
    }
    if full_day_value < Decimal::ZERO && full_day_units > 0 {
        warnings.push(AuditWarning {
            code: "NEGATIVE_FULL_DAY_VALUE".to_string(),
            message: format!(
                "Incidental allowance R$ {} exceeds the unit rate R$ {}",
                incidental_allowance, k
            ),
            severity: "high".to_string(),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "total_amount".to_string(),
        rule_name: "Total Amount".to_string(),
        sheet_ref: "TOTAL".to_string(),
        input: serde_json::json!({
            "unit_rate": k.to_string(),
            "incidental_allowance": incidental_allowance.to_string(),
            "l": full_day_units,
            "m": half_day_units,
            "n": lodging_units
        }),
        output: serde_json::json!({
            "half_day_value": half_day_value.to_string(),
            "full_day_value": full_day_value.to_string(),
            "lodging_value": lodging_value.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "{} × {} + {} × {} + {} × {} = R$ {}",
            half_day_value,
            half_day_units,
            full_day_value,
            full_day_units,
            lodging_value,
            lodging_units,
            total
        ),
    };

    Ok(TotalResult {
        half_day_value,
        full_day_value,
        lodging_value,
        total,
        warnings,
        audit_step,
    })
}

//! The full per-diem pipeline.

use tracing::debug;

use crate::config::DiariaConfig;
use crate::error::EngineResult;
use crate::models::{AuditTrace, AuditWarning, DiariaResult, TravelRequest};

use super::{
    calculate_factors, calculate_total, calculate_unit_rate, classify_destination, count_days,
    distribute_quantities,
};

/// Calculates the per-diem for one trip.
///
/// Runs destination classification, day counting, quantity distribution,
/// the G/H factors, the unit rate and the total, in that order. Each stage
/// appends one audit step. The result is deterministic for identical inputs.
///
/// # Errors
///
/// Returns `InvalidRange` when `end` is not after `start`, `UnknownRate`
/// when the rank has no base daily rate, and `AmountOverflow` when a
/// seniority override or rate is too large to compute with.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::calculate_diaria;
/// use diaria_engine::config::DiariaConfig;
/// use diaria_engine::models::{parse_timestamp, Seniority, TenureBonus, TravelRequest};
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
/// use std::str::FromStr;
///
/// let config = DiariaConfig::default().with_daily_rates(HashMap::from([(
///     "CAP".to_string(),
///     Decimal::from_str("509.22").unwrap(),
/// )]));
/// let request = TravelRequest {
///     rank: "CAP".to_string(),
///     municipality: "Araxá".to_string(),
///     start: parse_timestamp("2026-12-01 06:00").unwrap(),
///     end: parse_timestamp("2026-12-05 18:00").unwrap(),
///     seniority: Seniority::Quinquennia(3),
///     tenure_bonus: TenureBonus::None,
///     outside_state: false,
///     lodging: false,
///     incidental_allowance: Decimal::from_str("74.98").unwrap(),
/// };
/// let result = calculate_diaria(&request, &config).unwrap();
/// assert_eq!(result.total, Decimal::from_str("2604.06").unwrap());
/// ```
pub fn calculate_diaria(request: &TravelRequest, config: &DiariaConfig) -> EngineResult<DiariaResult> {
    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let destination = classify_destination(
        &request.municipality,
        request.outside_state,
        config,
        step_number,
    );
    trace.steps.push(destination.audit_step);
    step_number += 1;

    let days = count_days(request.start, request.end, step_number)?;
    trace.steps.push(days.audit_step);
    step_number += 1;

    let quantities =
        distribute_quantities(days.full_days, days.half_days, request.lodging, step_number);
    trace.steps.push(quantities.audit_step);
    step_number += 1;

    let factors = calculate_factors(request.seniority, request.tenure_bonus, step_number);
    trace.steps.push(factors.audit_step);
    step_number += 1;

    let unit_rate = calculate_unit_rate(
        &request.rank,
        destination.destination,
        factors.tenure_multiplier,
        config,
        step_number,
    )?;
    if unit_rate.floor_applied {
        trace.warnings.push(AuditWarning {
            code: "LOCATION_FLOOR_APPLIED".to_string(),
            message: format!(
                "Adjusted rate R$ {} raised to the {} floor R$ {}",
                unit_rate.adjusted_rate, destination.destination, unit_rate.floor
            ),
            severity: "low".to_string(),
        });
    }
    trace.steps.push(unit_rate.audit_step);
    step_number += 1;

    let total = calculate_total(
        unit_rate.unit_rate,
        quantities.full_day_units,
        quantities.half_day_units,
        quantities.lodging_units,
        request.incidental_allowance,
        step_number,
    )?;
    trace.steps.push(total.audit_step);
    trace.warnings.extend(total.warnings);

    debug!(
        rank = %unit_rate.rank,
        destination = %destination.destination,
        full_days = days.full_days,
        half_days = days.half_days,
        unit_rate = %unit_rate.unit_rate,
        total = %total.total,
        "Diária calculated"
    );

    Ok(DiariaResult {
        destination: destination.destination,
        full_days: days.full_days,
        half_days: days.half_days,
        full_day_units: quantities.full_day_units,
        half_day_units: quantities.half_day_units,
        lodging_units: quantities.lodging_units,
        seniority_factor: factors.seniority_factor,
        tenure_multiplier: factors.tenure_multiplier,
        base_daily_rate: unit_rate.base_daily_rate,
        unit_rate: unit_rate.unit_rate,
        incidental_allowance: request.incidental_allowance,
        half_day_value: total.half_day_value,
        full_day_value: total.full_day_value,
        lodging_value: total.lodging_value,
        total: total.total,
        audit_trace: trace,
    })
}

//! Distribution of DI/PA into paid quantities (L, M, N).

use crate::models::AuditStep;

/// The paid quantities for a trip.
#[derive(Debug, Clone)]
pub struct QuantityResult {
    /// L: units paid at the full-day rate.
    pub full_day_units: u32,
    /// M: units paid at the half-day rate.
    pub half_day_units: u32,
    /// N: half-rate lodging surcharge units.
    pub lodging_units: u32,
    /// The audit step recording this distribution.
    pub audit_step: AuditStep,
}

/// Maps DI and PA to the L, M and N quantities.
///
/// L is always DI and M is always PA. With lodging provided every full day
/// also carries a lodging surcharge, so N is DI; otherwise N is 0.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::distribute_quantities;
///
/// let result = distribute_quantities(4, 1, true, 1);
/// assert_eq!(
///     (result.full_day_units, result.half_day_units, result.lodging_units),
///     (4, 1, 4)
/// );
/// ```
pub fn distribute_quantities(
    full_days: u32,
    half_days: u32,
    lodging: bool,
    step_number: u32,
) -> QuantityResult {
    let full_day_units = full_days;
    let half_day_units = half_days;
    let lodging_units = if lodging { full_days } else { 0 };

    let reasoning = if lodging {
        format!(
            "L = DI = {}, M = PA = {}, lodging provided so N = DI = {}",
            full_day_units, half_day_units, lodging_units
        )
    } else {
        format!(
            "L = DI = {}, M = PA = {}, no lodging so N = 0",
            full_day_units, half_day_units
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "quantity_distribution".to_string(),
        rule_name: "Quantity Distribution".to_string(),
        sheet_ref: "L:N".to_string(),
        input: serde_json::json!({
            "di": full_days,
            "pa": half_days,
            "lodging": lodging
        }),
        output: serde_json::json!({
            "l": full_day_units,
            "m": half_day_units,
            "n": lodging_units
        }),
        reasoning,
    };

    QuantityResult {
        full_day_units,
        half_day_units,
        lodging_units,
        audit_step,
    }
}

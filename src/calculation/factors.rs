//! Seniority (G) and tenure (H) factors.
//!
//! G comes from the member's quinquennium count, or from the ADE
//! percentage divided by ten when one is supplied. H turns G into the
//! multiplier applied to the base daily rate, depending on the tenure
//! bonus category.

use rust_decimal::Decimal;

use crate::models::{AuditStep, Seniority, TenureBonus};

/// The 10% tenure bonus multiplier (1.1).
const TENURE_BONUS: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// The result of computing G and H.
#[derive(Debug, Clone)]
pub struct FactorResult {
    /// G: seniority factor.
    pub seniority_factor: Decimal,
    /// H: tenure multiplier.
    pub tenure_multiplier: Decimal,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

/// Computes the seniority factor G.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::seniority_factor;
/// use diaria_engine::models::Seniority;
/// use rust_decimal::Decimal;
///
/// assert_eq!(seniority_factor(Seniority::Quinquennia(3)), Decimal::from(3));
/// assert_eq!(seniority_factor(Seniority::Override(Decimal::from(30))), Decimal::from(3));
/// ```
pub fn seniority_factor(seniority: Seniority) -> Decimal {
    match seniority {
        Seniority::Quinquennia(count) => Decimal::from(count),
        Seniority::Override(value) => value / Decimal::TEN,
    }
}

/// Computes the tenure multiplier H from G.
///
/// - pre-September-2007 bonus: `(1 + G/10) × 1.1`
/// - post-September-2007 bonus: `1.1 + G/10`
/// - no bonus: `1 + G/10`
///
/// H is not rounded.
pub fn tenure_multiplier(seniority_factor: Decimal, bonus: TenureBonus) -> Decimal {
    let increment = seniority_factor / Decimal::TEN;
    match bonus {
        TenureBonus::PreSeptember2007 => (Decimal::ONE + increment) * TENURE_BONUS,
        TenureBonus::PostSeptember2007 => TENURE_BONUS + increment,
        TenureBonus::None => Decimal::ONE + increment,
    }
}

/// Computes G and H together and records the audit step.
pub fn calculate_factors(
    seniority: Seniority,
    bonus: TenureBonus,
    step_number: u32,
) -> FactorResult {
    let g = seniority_factor(seniority);
    let h = tenure_multiplier(g, bonus);

    let source = match seniority {
        Seniority::Quinquennia(count) => format!("{} quinquennia", count),
        Seniority::Override(value) => format!("ADE {} / 10", value.normalize()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "seniority_factors".to_string(),
        rule_name: "Seniority and Tenure Factors".to_string(),
        sheet_ref: "G:H".to_string(),
        input: serde_json::json!({
            "seniority": seniority,
            "tenure_bonus": bonus
        }),
        output: serde_json::json!({
            "g": g.to_string(),
            "h": h.to_string()
        }),
        reasoning: format!(
            "G = {} = {}; H = {} with tenure bonus '{}'",
            source,
            g.normalize(),
            h.normalize(),
            bonus
        ),
    };

    FactorResult {
        seniority_factor: g,
        tenure_multiplier: h,
        audit_step,
    }
}

//! Destination classification.
//!
//! Decides which location floor applies to a trip from the municipality
//! name, the special municipality list and the out-of-state flag.

use crate::config::DiariaConfig;
use crate::models::{AuditStep, Destination, normalize_name};

/// The result of classifying a destination, including the audit step.
#[derive(Debug, Clone)]
pub struct DestinationResult {
    /// The location class.
    pub destination: Destination,
    /// The audit step recording this classification.
    pub audit_step: AuditStep,
}

/// Classifies a destination municipality.
///
/// Precedence, first match wins:
/// 1. a state capital is [`Destination::Capital`];
/// 2. a name on the special list is [`Destination::SpecialMunicipality`];
/// 3. any other name outside the home state is [`Destination::SpecialMunicipality`];
/// 4. everything else is [`Destination::OtherMunicipality`].
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::classify_destination;
/// use diaria_engine::config::DiariaConfig;
/// use diaria_engine::models::Destination;
///
/// let config = DiariaConfig::default();
/// let result = classify_destination("Belo Horizonte", false, &config, 1);
/// assert_eq!(result.destination, Destination::Capital);
///
/// let result = classify_destination("Franca", true, &config, 1);
/// assert_eq!(result.destination, Destination::SpecialMunicipality);
/// ```
pub fn classify_destination(
    municipality: &str,
    outside_state: bool,
    config: &DiariaConfig,
    step_number: u32,
) -> DestinationResult {
    let normalized = normalize_name(municipality);
    let is_capital = config.capitals().contains(&normalized);
    let is_special = config.special_municipalities().contains(&normalized);

    let (destination, reasoning) = if is_capital {
        (
            Destination::Capital,
            format!("'{}' is a state capital", municipality.trim()),
        )
    } else if is_special {
        (
            Destination::SpecialMunicipality,
            format!("'{}' is on the special municipality list", municipality.trim()),
        )
    } else if outside_state {
        (
            Destination::SpecialMunicipality,
            format!(
                "'{}' is outside the home state and not a capital",
                municipality.trim()
            ),
        )
    } else {
        (
            Destination::OtherMunicipality,
            format!(
                "'{}' is neither a capital nor a special municipality",
                municipality.trim()
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "destination_classification".to_string(),
        rule_name: "Destination Classification".to_string(),
        sheet_ref: "LOCALIDADE".to_string(),
        input: serde_json::json!({
            "municipality": municipality,
            "normalized": normalized,
            "outside_state": outside_state
        }),
        output: serde_json::json!({
            "destination": destination,
            "is_capital": is_capital,
            "is_special_municipality": is_special
        }),
        reasoning,
    };

    DestinationResult {
        destination,
        audit_step,
    }
}

//! Request types for the diária engine API.
//!
//! This module defines the JSON request structure for the `/calculate` endpoint.

use std::borrow::Cow;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DiariaConfig;
use crate::error::EngineResult;
use crate::models::{Seniority, TenureBonus, TravelRequest, parse_timestamp};

/// Request body for the `/calculate` endpoint.
///
/// Timestamps are `YYYY-MM-DD HH:MM` (the ISO `T` form is also accepted).
/// `daily_rates` and `special_municipalities` replace the configured tables
/// for this request only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Rank code or display name.
    pub rank: String,
    /// Destination municipality.
    pub municipality: String,
    /// Departure timestamp.
    pub start: String,
    /// Return timestamp.
    pub end: String,
    /// Number of quinquennia.
    #[serde(default)]
    pub quinquennia: u32,
    /// ADE percentage; replaces the quinquennium count when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_override: Option<Decimal>,
    /// Tenure bonus category.
    #[serde(default)]
    pub tenure_bonus: TenureBonus,
    /// Destination lies outside the home state.
    #[serde(default)]
    pub outside_state: bool,
    /// Lodging provided.
    #[serde(default)]
    pub lodging: bool,
    /// Incidental allowance; the configured default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incidental_allowance: Option<Decimal>,
    /// Base daily rate per rank code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rates: Option<HashMap<String, Decimal>>,
    /// Special municipality names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_municipalities: Option<Vec<String>>,
}

impl CalculationRequest {
    /// The configuration to calculate with: the shared one, or a copy with
    /// the request's override tables applied.
    pub fn effective_config<'a>(&self, base: &'a DiariaConfig) -> Cow<'a, DiariaConfig> {
        if self.daily_rates.is_none() && self.special_municipalities.is_none() {
            return Cow::Borrowed(base);
        }

        let mut config = base.clone();
        if let Some(rates) = &self.daily_rates {
            config = config.with_daily_rates(rates.clone());
        }
        if let Some(municipalities) = &self.special_municipalities {
            config = config.with_special_municipalities(municipalities.iter().cloned());
        }
        Cow::Owned(config)
    }

    /// Converts the request into a domain [`TravelRequest`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimestamp` when `start` or `end` cannot be parsed.
    pub fn to_travel_request(&self, config: &DiariaConfig) -> EngineResult<TravelRequest> {
        Ok(TravelRequest {
            rank: self.rank.clone(),
            municipality: self.municipality.clone(),
            start: parse_timestamp(&self.start)?,
            end: parse_timestamp(&self.end)?,
            seniority: Seniority::from_parts(self.quinquennia, self.seniority_override),
            tenure_bonus: self.tenure_bonus,
            outside_state: self.outside_state,
            lodging: self.lodging,
            incidental_allowance: self
                .incidental_allowance
                .unwrap_or_else(|| config.incidental_allowance()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let json = r#"{
            "rank": "CAP",
            "municipality": "Uberaba",
            "start": "2026-12-01 06:00",
            "end": "2026-12-05 18:00"
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.rank, "CAP");
        assert_eq!(request.quinquennia, 0);
        assert_eq!(request.tenure_bonus, TenureBonus::None);
        assert!(!request.lodging);
        assert!(request.incidental_allowance.is_none());
        assert!(request.daily_rates.is_none());
    }

    #[test]
    fn test_deserialize_full_request() {
        let json = r#"{
            "rank": "1° Tenente",
            "municipality": "Franca",
            "start": "2026-12-01T06:00:00",
            "end": "2026-12-02 06:00",
            "quinquennia": 2,
            "seniority_override": 30,
            "tenure_bonus": "Sim - anterior a 1ºSet07",
            "outside_state": true,
            "lodging": true,
            "incidental_allowance": "80.00",
            "daily_rates": {"1TEN": "452.87"},
            "special_municipalities": ["Franca"]
        }"#;

        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.seniority_override, Some(dec("30")));
        assert_eq!(request.tenure_bonus, TenureBonus::PreSeptember2007);
        assert_eq!(request.incidental_allowance, Some(dec("80.00")));
        assert_eq!(request.daily_rates.as_ref().unwrap()["1TEN"], dec("452.87"));
    }

    #[test]
    fn test_conversion_uses_configured_allowance() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"rank": "CAP", "municipality": "Uberaba", "start": "2026-12-01 06:00", "end": "2026-12-05 18:00", "quinquennia": 3}"#,
        )
        .unwrap();

        let travel = request.to_travel_request(&DiariaConfig::default()).unwrap();
        assert_eq!(travel.incidental_allowance, dec("74.98"));
        assert_eq!(travel.seniority, Seniority::Quinquennia(3));
    }

    #[test]
    fn test_conversion_rejects_bad_timestamp() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"rank": "CAP", "municipality": "Uberaba", "start": "01/12/2026", "end": "2026-12-05 18:00"}"#,
        )
        .unwrap();

        match request.to_travel_request(&DiariaConfig::default()) {
            Err(EngineError::InvalidTimestamp { value, .. }) => assert_eq!(value, "01/12/2026"),
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_config_borrows_without_overrides() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"rank": "CAP", "municipality": "Uberaba", "start": "2026-12-01 06:00", "end": "2026-12-05 18:00"}"#,
        )
        .unwrap();
        let base = DiariaConfig::default();

        assert!(matches!(request.effective_config(&base), Cow::Borrowed(_)));
    }

    #[test]
    fn test_effective_config_applies_overrides() {
        let request: CalculationRequest = serde_json::from_str(
            r#"{"rank": "CAP", "municipality": "Franca", "start": "2026-12-01 06:00", "end": "2026-12-05 18:00",
                "daily_rates": {"cap": "509.22"}, "special_municipalities": ["Franca"]}"#,
        )
        .unwrap();
        let base = DiariaConfig::default();

        let config = request.effective_config(&base);
        assert_eq!(config.daily_rate("CAP").unwrap().1, dec("509.22"));
        assert!(config.is_special_municipality("franca"));
        assert!(base.daily_rate("CAP").is_err());
    }
}

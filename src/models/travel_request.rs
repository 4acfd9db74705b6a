//! Travel request model and timestamp handling.
//!
//! A [`TravelRequest`] carries everything the calculator needs for one
//! member on one trip. Timestamps travel as `YYYY-MM-DD HH:MM` strings.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::TenureBonus;

/// The canonical timestamp format used by requests and the CLI.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a timestamp in `YYYY-MM-DD HH:MM` form.
///
/// Seconds and the ISO `T` separator are also accepted.
///
/// # Example
///
/// ```
/// use diaria_engine::models::parse_timestamp;
///
/// let ts = parse_timestamp("2026-12-01 06:00").unwrap();
/// assert_eq!(ts.to_string(), "2026-12-01 06:00:00");
/// assert!(parse_timestamp("01/12/2026 06:00").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> EngineResult<NaiveDateTime> {
    let trimmed = value.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| EngineError::InvalidTimestamp {
            value: value.to_string(),
            message: "expected YYYY-MM-DD HH:MM".to_string(),
        })
}

/// Serde helpers for `YYYY-MM-DD HH:MM` timestamps.
///
/// Use with `#[serde(with = "diaria_engine::models::timestamp")]`.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, TIMESTAMP_FORMAT};

    /// Serializes a timestamp in the canonical format.
    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    /// Deserializes a timestamp from any accepted format.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// How the seniority factor G is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Count of completed five-year periods; G equals the count.
    Quinquennia(u32),
    /// Performance bonus percentage (ADE); G equals the value divided by ten.
    Override(Decimal),
}

impl Default for Seniority {
    fn default() -> Self {
        Seniority::Quinquennia(0)
    }
}

impl Seniority {
    /// Builds the seniority from a quinquennium count and an optional override,
    /// the override winning when present.
    pub fn from_parts(quinquennia: u32, override_value: Option<Decimal>) -> Self {
        match override_value {
            Some(value) => Seniority::Override(value),
            None => Seniority::Quinquennia(quinquennia),
        }
    }
}

/// A single per-diem calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRequest {
    /// Rank code (e.g., "CAP"); trimmed and uppercased before lookup.
    pub rank: String,
    /// Destination municipality, free text.
    pub municipality: String,
    /// Departure.
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    /// Return.
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    /// Seniority source for the G factor.
    #[serde(default)]
    pub seniority: Seniority,
    /// Tenure bonus category for the H factor.
    #[serde(default)]
    pub tenure_bonus: TenureBonus,
    /// Whether the destination lies outside the home state.
    #[serde(default)]
    pub outside_state: bool,
    /// Whether lodging is provided, which adds a half-rate surcharge per full day.
    #[serde(default)]
    pub lodging: bool,
    /// Incidental allowance ("ajuda de custo") deducted from each paid unit.
    pub incidental_allowance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_canonical_timestamp() {
        let ts = parse_timestamp("2025-12-19 07:00").unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2025-12-19 07:00");
    }

    #[test]
    fn test_parse_iso_timestamp() {
        let ts = parse_timestamp("2025-12-19T07:00:30").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "07:00:30");
    }

    #[test]
    fn test_parse_invalid_timestamp_keeps_raw_value() {
        match parse_timestamp("19/12/2025") {
            Err(EngineError::InvalidTimestamp { value, .. }) => assert_eq!(value, "19/12/2025"),
            other => panic!("Expected InvalidTimestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_seniority_override_wins() {
        let seniority = Seniority::from_parts(3, Some(Decimal::from_str("30").unwrap()));
        assert_eq!(seniority, Seniority::Override(Decimal::from(30)));
        assert_eq!(Seniority::from_parts(2, None), Seniority::Quinquennia(2));
    }

    #[test]
    fn test_deserialize_travel_request() {
        let json = r#"{
            "rank": "Cap",
            "municipality": "Betim",
            "start": "2025-12-19 07:00",
            "end": "2025-12-22 18:00",
            "seniority": {"quinquennia": 2},
            "incidental_allowance": "74.98"
        }"#;

        let request: TravelRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.rank, "Cap");
        assert_eq!(request.seniority, Seniority::Quinquennia(2));
        assert_eq!(request.tenure_bonus, TenureBonus::None);
        assert!(!request.lodging);
        assert_eq!(request.incidental_allowance, Decimal::new(7498, 2));
    }

    #[test]
    fn test_serialize_uses_canonical_timestamp() {
        let request = TravelRequest {
            rank: "CAP".to_string(),
            municipality: "Betim".to_string(),
            start: parse_timestamp("2025-12-19 07:00").unwrap(),
            end: parse_timestamp("2025-12-22 18:00").unwrap(),
            seniority: Seniority::default(),
            tenure_bonus: TenureBonus::None,
            outside_state: false,
            lodging: false,
            incidental_allowance: Decimal::new(7498, 2),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"start\":\"2025-12-19 07:00\""));
        assert!(json.contains("\"end\":\"2025-12-22 18:00\""));
    }
}

//! Trip leg extraction from the individual travel report.
//!
//! The report prints the legs as a table flattened to one cell per line:
//! a two-digit sequence line followed by departure place, date and time,
//! then arrival place, date and time. Unused sequence numbers appear alone.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

static MILITARY_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"N\.\s*MILITAR:\s*:?\s*(?<number>\d{3}\.\d{3}-\d)").expect("military number regex")
});

static SEQUENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}$").expect("sequence regex"));

static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}").expect("date regex"));

const TABLE_END_MARKERS: [&str; 3] = ["OBSERVAÇÕES", "Referência:", "Criado por"];

/// One leg of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLeg {
    /// Leg sequence number.
    pub sequence: u32,
    /// Departure place.
    pub departure_place: String,
    /// Departure date, `dd/mm/yyyy`.
    pub departure_date: String,
    /// Departure time, `HH:MM`.
    pub departure_time: String,
    /// Arrival place.
    pub arrival_place: String,
    /// Arrival date, `dd/mm/yyyy`.
    pub arrival_date: String,
    /// Arrival time, `HH:MM`.
    pub arrival_time: String,
}

impl TripLeg {
    /// Departure as a timestamp.
    pub fn departure(&self) -> EngineResult<NaiveDateTime> {
        report_timestamp(&self.departure_date, &self.departure_time)
    }

    /// Arrival as a timestamp.
    pub fn arrival(&self) -> EngineResult<NaiveDateTime> {
        report_timestamp(&self.arrival_date, &self.arrival_time)
    }
}

/// The trip legs of one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripReport {
    /// Military number the report belongs to, when found.
    pub military_number: Option<String>,
    /// Legs in report order.
    pub legs: Vec<TripLeg>,
}

impl TripReport {
    /// The travel interval: first departure to last arrival.
    ///
    /// # Errors
    ///
    /// Returns `ReportParse` when there are no legs or a date is malformed,
    /// and `InvalidRange` when the last arrival is not after the first
    /// departure.
    pub fn travel_interval(&self) -> EngineResult<(NaiveDateTime, NaiveDateTime)> {
        let (first, last) = match (self.legs.first(), self.legs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(EngineError::ReportParse {
                    message: "report has no trip legs".to_string(),
                });
            }
        };

        let start = first.departure()?;
        let end = last.arrival()?;
        if end <= start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok((start, end))
    }
}

/// Extracts the military number and the trip legs from a report.
///
/// Legs are read after the header line naming both "LOCAL DE PARTIDA" and
/// "LOCAL DE DESTINO", up to the observations or the document footer.
/// Without that header the report has no legs.
pub fn parse_trip_legs(text: &str) -> TripReport {
    let military_number = MILITARY_NUMBER
        .captures(text)
        .map(|caps| caps["number"].to_string());

    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let Some(header) = lines
        .iter()
        .position(|line| line.contains("LOCAL DE PARTIDA") && line.contains("LOCAL DE DESTINO"))
    else {
        return TripReport {
            military_number,
            legs: Vec::new(),
        };
    };

    let mut legs = Vec::new();
    let mut i = header + 1;
    while i < lines.len() {
        let line = lines[i];
        if TABLE_END_MARKERS.iter().any(|marker| line.contains(marker)) {
            break;
        }

        if SEQUENCE.is_match(line) {
            let cell = |offset: usize| lines.get(i + offset).copied().unwrap_or("");
            let departure_place = cell(1);
            let departure_date = cell(2);
            let is_leg = !departure_place.is_empty()
                && !SEQUENCE.is_match(departure_place)
                && !TABLE_END_MARKERS
                    .iter()
                    .any(|marker| departure_place.contains(marker))
                && DATE.is_match(departure_date);

            if is_leg {
                legs.push(TripLeg {
                    sequence: line.parse().unwrap_or_default(),
                    departure_place: departure_place.to_string(),
                    departure_date: departure_date.to_string(),
                    departure_time: cell(3).to_string(),
                    arrival_place: cell(4).to_string(),
                    arrival_date: cell(5).to_string(),
                    arrival_time: cell(6).to_string(),
                });
                i += 7;
                continue;
            }
        }
        i += 1;
    }

    TripReport {
        military_number,
        legs,
    }
}

fn report_timestamp(date: &str, time: &str) -> EngineResult<NaiveDateTime> {
    let parsed_date = NaiveDate::parse_from_str(date, "%d/%m/%Y").map_err(|e| {
        EngineError::ReportParse {
            message: format!("invalid date '{}': {}", date, e),
        }
    })?;
    let parsed_time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| {
        EngineError::ReportParse {
            message: format!("invalid time '{}': {}", time, e),
        }
    })?;
    Ok(parsed_date.and_time(parsed_time))
}

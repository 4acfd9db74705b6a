//! Roster table extraction.
//!
//! The travel authorization report lists one member per row:
//!
//! ```text
//! 01 BOA 047.600.536-11 147.857-7 Bruno França Gonçalves  Capitão - 30 Belo Horizonte - MG Teófilo Otoni/Uberlândia 441 km - 1 - Itaú - 341 6662 05749-3
//! ```
//!
//! Columns are sequence, unit, CPF, military number, name, rank,
//! advantages (QQ, ADE), seat, destinations, distance, the planned
//! DI / PA-PP / ½PA counts, bank, agency and account. A `-` cell is empty.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Seniority;

static ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?<seq>\d{2,})\s+(?<unit>\S+)\s+(?<cpf>\d{3}\.\d{3}\.\d{3}-\d{2})\s+(?<military>\d{3}\.\d{3}-\d)\s+(?<rest>.+)$",
    )
    .expect("roster row regex")
});

// Longer names first: alternation is leftmost-first at each position.
static RANK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?<rank>Tenente[- ]Coronel|[12][°º] Tenente|[123][°º] Sargento|Subtenente|Aspirante|Capitão|Coronel|Major|Sargento|Tenente|Cabo|Soldado|General)\b",
    )
    .expect("rank regex")
});

static TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?<qq>\S+)\s+(?<ade>\S+)\s+(?<seat>.+?\s*-\s*[A-Z]{2})\s+(?<destinations>.+?)\s+(?<distance>\d+)\s*km\s+(?<di>\S+)\s+(?<pa_pp>\S+)\s+(?<half_pa>\S+)\s+(?<bank>.+?)\s+(?<agency>\S+)\s+(?<account>\S+)$",
    )
    .expect("roster tail regex")
});

/// One member row of the roster table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Row sequence number.
    pub sequence: u32,
    /// Unit acronym.
    pub unit: String,
    /// CPF, formatted.
    pub cpf: String,
    /// Military number, formatted (`ddd.ddd-d`).
    pub military_number: String,
    /// Full name.
    pub name: String,
    /// Rank as printed (e.g., "1° Tenente").
    pub rank: String,
    /// QQ advantage column.
    pub quinquennia: Option<u32>,
    /// ADE advantage percentage.
    pub ade: Option<Decimal>,
    /// Home seat, `City - UF`.
    pub seat: String,
    /// Destination municipalities.
    pub destinations: Vec<String>,
    /// Distance in kilometres.
    pub distance_km: u32,
    /// Planned full days.
    pub planned_full_days: Option<u32>,
    /// Planned PA/PP count.
    pub planned_half_days: Option<u32>,
    /// Planned ½PA count.
    pub planned_half_pa: Option<u32>,
    /// Bank name and code.
    pub bank: String,
    /// Bank agency.
    pub agency: String,
    /// Bank account.
    pub account: String,
}

impl RosterEntry {
    /// Seniority for the G factor: the ADE percentage when present,
    /// otherwise the QQ count.
    pub fn seniority(&self) -> Seniority {
        Seniority::from_parts(self.quinquennia.unwrap_or(0), self.ade)
    }
}

/// Extracts every roster row from the report text, in sequence order.
///
/// Lines that do not have the row layout are skipped.
///
/// # Examples
///
/// ```
/// use diaria_engine::report::parse_roster;
///
/// let text = "01 BOA 047.600.536-11 147.857-7 Bruno França Gonçalves  Capitão - 30 Belo Horizonte - MG Teófilo Otoni/Uberlândia 441 km - 1 - Itaú - 341 6662 05749-3";
/// let roster = parse_roster(text);
/// assert_eq!(roster[0].rank, "Capitão");
/// assert_eq!(roster[0].destinations, vec!["Teófilo Otoni", "Uberlândia"]);
/// ```
pub fn parse_roster(text: &str) -> Vec<RosterEntry> {
    let mut entries: Vec<RosterEntry> = text.lines().filter_map(parse_row).collect();
    entries.sort_by_key(|entry| entry.sequence);
    entries
}

fn parse_row(line: &str) -> Option<RosterEntry> {
    let row = ROW.captures(line.trim())?;
    let rest = &row["rest"];

    let rank = RANK.captures(rest)?;
    let rank_match = rank.name("rank")?;
    let name = rest[..rank_match.start()].trim();
    let tail = TAIL.captures(rest[rank_match.end()..].trim())?;

    Some(RosterEntry {
        sequence: row["seq"].parse().ok()?,
        unit: row["unit"].to_string(),
        cpf: row["cpf"].to_string(),
        military_number: row["military"].to_string(),
        name: name.to_string(),
        rank: rank_match.as_str().to_string(),
        quinquennia: cell(&tail["qq"]),
        ade: cell(&tail["ade"]),
        seat: tail["seat"].trim().to_string(),
        destinations: tail["destinations"]
            .split('/')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from)
            .collect(),
        distance_km: tail["distance"].parse().ok()?,
        planned_full_days: cell(&tail["di"]),
        planned_half_days: cell(&tail["pa_pp"]),
        planned_half_pa: cell(&tail["half_pa"]),
        bank: tail["bank"].trim().to_string(),
        agency: tail["agency"].to_string(),
        account: tail["account"].to_string(),
    })
}

/// Parses a cell, `-` or anything unparseable being empty.
fn cell<T: FromStr>(value: &str) -> Option<T> {
    match value.trim() {
        "" | "-" => None,
        v => v.parse().ok(),
    }
}

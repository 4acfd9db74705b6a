//! Configuration types for per-diem calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML tables, plus the assembled
//! [`DiariaConfig`] the calculator reads from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::models::{Destination, normalize_name};

use super::defaults::{
    DEFAULT_CAPITAL_FLOOR, DEFAULT_INCIDENTAL_ALLOWANCE, DEFAULT_OTHER_MUNICIPALITY_FLOOR,
    DEFAULT_SPECIAL_MUNICIPALITY_FLOOR, STATE_CAPITALS,
};

/// Metadata about the rate tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Short identifier of the table set (e.g., "CBMMG-DIARIAS").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date of the tables.
    pub version: String,
    /// Where the values were taken from.
    #[serde(default)]
    pub source: String,
}

impl Default for TableMetadata {
    fn default() -> Self {
        Self {
            code: "CBMMG-DIARIAS".to_string(),
            name: "Built-in diária tables".to_string(),
            version: "builtin".to_string(),
            source: String::new(),
        }
    }
}

/// Minimum unit rate per destination class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFloors {
    /// Floor for state capitals.
    pub capital: Decimal,
    /// Floor for special municipalities and out-of-state destinations.
    pub special_municipality: Decimal,
    /// Floor for every other municipality.
    pub other_municipality: Decimal,
}

impl LocationFloors {
    /// Returns the floor for a destination class.
    pub fn floor_for(&self, destination: Destination) -> Decimal {
        match destination {
            Destination::Capital => self.capital,
            Destination::SpecialMunicipality => self.special_municipality,
            Destination::OtherMunicipality => self.other_municipality,
        }
    }
}

impl Default for LocationFloors {
    fn default() -> Self {
        Self {
            capital: DEFAULT_CAPITAL_FLOOR,
            special_municipality: DEFAULT_SPECIAL_MUNICIPALITY_FLOOR,
            other_municipality: DEFAULT_OTHER_MUNICIPALITY_FLOOR,
        }
    }
}

/// Structure of `diaria.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TablesFile {
    /// Table metadata.
    pub metadata: TableMetadata,
    /// Location floors.
    pub location_floors: LocationFloors,
    /// Default incidental allowance.
    pub incidental_allowance: Decimal,
}

/// A rank and its base daily rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRate {
    /// Display name of the rank (e.g., "Capitão").
    pub name: String,
    /// Base daily value for the rank.
    pub daily_rate: Decimal,
}

/// Structure of `ranks.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RanksFile {
    /// Map of rank code to rank details.
    pub ranks: HashMap<String, RankRate>,
}

impl RanksFile {
    /// Returns a display name shared by two or more rank codes, if any.
    ///
    /// Names are compared the way `resolve_rank` compares them; codes are
    /// visited in sorted order so the same file always reports the same name.
    pub fn duplicate_name(&self) -> Option<&str> {
        let mut codes: Vec<&String> = self.ranks.keys().collect();
        codes.sort();

        let mut seen = HashSet::new();
        codes
            .into_iter()
            .map(|code| self.ranks[code].name.as_str())
            .find(|name| !seen.insert(normalize_rank_name(name)))
    }
}

/// Normalizes a rank code: trimmed and uppercased.
pub fn normalize_rank_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalizes a rank display name so "1° Tenente" and "1º tenente" compare equal.
fn normalize_rank_name(name: &str) -> String {
    normalize_name(&name.replace(['°', 'º'], "o"))
}

/// The complete configuration the calculator reads from.
///
/// Rank codes are stored uppercased and municipality names normalized, so
/// lookups only need to normalize their input.
///
/// # Example
///
/// ```
/// use diaria_engine::config::DiariaConfig;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let config = DiariaConfig::default()
///     .with_daily_rates(HashMap::from([("cap".to_string(), Decimal::new(50922, 2))]));
/// assert_eq!(config.daily_rate(" Cap ").unwrap().1, Decimal::new(50922, 2));
/// assert!(config.is_capital("Belo Horizonte"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiariaConfig {
    metadata: TableMetadata,
    floors: LocationFloors,
    incidental_allowance: Decimal,
    capitals: HashSet<String>,
    special_municipalities: HashSet<String>,
    ranks: HashMap<String, RankRate>,
}

impl DiariaConfig {
    /// Creates a configuration from its component parts.
    ///
    /// Capitals always come from the fixed list of state capitals.
    pub fn new(
        metadata: TableMetadata,
        floors: LocationFloors,
        incidental_allowance: Decimal,
        special_municipalities: impl IntoIterator<Item = String>,
        ranks: HashMap<String, RankRate>,
    ) -> Self {
        Self {
            metadata,
            floors,
            incidental_allowance,
            capitals: STATE_CAPITALS.iter().map(|c| normalize_name(c)).collect(),
            special_municipalities: special_municipalities
                .into_iter()
                .map(|m| normalize_name(&m))
                .filter(|m| !m.is_empty())
                .collect(),
            ranks: ranks
                .into_iter()
                .map(|(code, rate)| (normalize_rank_code(&code), rate))
                .collect(),
        }
    }

    /// Returns the table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Returns the location floors.
    pub fn floors(&self) -> &LocationFloors {
        &self.floors
    }

    /// Returns the default incidental allowance.
    pub fn incidental_allowance(&self) -> Decimal {
        self.incidental_allowance
    }

    /// Returns the configured ranks keyed by code.
    pub fn ranks(&self) -> &HashMap<String, RankRate> {
        &self.ranks
    }

    /// Returns the normalized special municipality names.
    pub fn special_municipalities(&self) -> &HashSet<String> {
        &self.special_municipalities
    }

    /// Returns the normalized state capital names.
    pub fn capitals(&self) -> &HashSet<String> {
        &self.capitals
    }

    /// Returns true if the name is a state capital.
    pub fn is_capital(&self, municipality: &str) -> bool {
        self.capitals.contains(&normalize_name(municipality))
    }

    /// Returns true if the name is on the special municipality list.
    pub fn is_special_municipality(&self, municipality: &str) -> bool {
        self.special_municipalities
            .contains(&normalize_name(municipality))
    }

    /// Resolves a rank given either as a code ("cap") or as a configured
    /// display name ("Capitão"), returning the normalized code.
    ///
    /// Unresolved input is returned as its normalized code so the caller can
    /// report it. When several codes share the name, the smallest code wins.
    pub fn resolve_rank(&self, rank: &str) -> String {
        let code = normalize_rank_code(rank);
        if self.ranks.contains_key(&code) {
            return code;
        }

        let wanted = normalize_rank_name(rank);
        self.ranks
            .iter()
            .filter(|(_, rate)| normalize_rank_name(&rate.name) == wanted)
            .map(|(code, _)| code)
            .min()
            .cloned()
            .unwrap_or(code)
    }

    /// Looks up the base daily rate for a rank.
    ///
    /// Returns the resolved code with the rate, or `UnknownRate`.
    pub fn daily_rate(&self, rank: &str) -> EngineResult<(String, Decimal)> {
        let code = self.resolve_rank(rank);
        self.ranks
            .get(&code)
            .map(|r| (code.clone(), r.daily_rate))
            .ok_or(EngineError::UnknownRate { rank: code })
    }

    /// Replaces the rate table, keeping display names of ranks that survive.
    pub fn with_daily_rates(mut self, rates: HashMap<String, Decimal>) -> Self {
        let previous = std::mem::take(&mut self.ranks);
        self.ranks = rates
            .into_iter()
            .map(|(code, daily_rate)| {
                let code = normalize_rank_code(&code);
                let name = previous
                    .get(&code)
                    .map(|r| r.name.clone())
                    .unwrap_or_else(|| code.clone());
                (code, RankRate { name, daily_rate })
            })
            .collect();
        self
    }

    /// Replaces the special municipality list.
    pub fn with_special_municipalities(
        mut self,
        municipalities: impl IntoIterator<Item = String>,
    ) -> Self {
        self.special_municipalities = municipalities
            .into_iter()
            .map(|m| normalize_name(&m))
            .filter(|m| !m.is_empty())
            .collect();
        self
    }
}

impl Default for DiariaConfig {
    /// Built-in defaults: standard floors and allowance, no special
    /// municipalities and an empty rate table.
    fn default() -> Self {
        Self::new(
            TableMetadata::default(),
            LocationFloors::default(),
            DEFAULT_INCIDENTAL_ALLOWANCE,
            Vec::new(),
            HashMap::new(),
        )
    }
}

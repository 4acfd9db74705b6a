//! Destination classification types.
//!
//! The per-diem floor depends on where the trip goes. This module defines the
//! three location classes used by the diária spreadsheet and the name
//! normalization shared by every municipality comparison.

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// The location class of a trip destination.
///
/// # Example
///
/// ```
/// use diaria_engine::models::Destination;
///
/// assert_eq!(Destination::SpecialMunicipality.label(), "Município Especial");
/// assert_eq!(
///     serde_json::to_string(&Destination::Capital).unwrap(),
///     "\"capital\""
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// A state capital.
    Capital,
    /// A municipality from the special list, or any destination outside the home state.
    SpecialMunicipality,
    /// Every other municipality.
    OtherMunicipality,
}

impl Destination {
    /// Returns the label the spreadsheet uses for this class.
    pub fn label(&self) -> &'static str {
        match self {
            Destination::Capital => "Capital",
            Destination::SpecialMunicipality => "Município Especial",
            Destination::OtherMunicipality => "Demais Municípios",
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalizes a municipality name for comparison.
///
/// Accents are folded to ASCII, the name is lowercased and runs of
/// whitespace collapse to a single space.
///
/// # Example
///
/// ```
/// use diaria_engine::models::normalize_name;
///
/// assert_eq!(normalize_name("  São   Paulo "), "sao paulo");
/// assert_eq!(normalize_name("UBERLÂNDIA"), "uberlandia");
/// ```
pub fn normalize_name(name: &str) -> String {
    deunicode(name)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

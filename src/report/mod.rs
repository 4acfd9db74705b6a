//! Travel-report text extraction.
//!
//! Reports come out of the document-management system as plain text. The
//! authorization report carries the roster table; the individual report
//! carries the trip legs of one member. [`parse_report`] reads both from
//! whatever text it is given.

mod roster;
mod trip;

use serde::{Deserialize, Serialize};

pub use roster::{RosterEntry, parse_roster};
pub use trip::{TripLeg, TripReport, parse_trip_legs};

/// Everything extracted from one report text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReport {
    /// Roster rows, possibly empty.
    pub roster: Vec<RosterEntry>,
    /// Trip legs, possibly empty.
    pub trip: TripReport,
}

impl ParsedReport {
    /// The roster entry the trip legs belong to, matched by military number.
    pub fn trip_member(&self) -> Option<&RosterEntry> {
        let number = self.trip.military_number.as_deref()?;
        self.roster
            .iter()
            .find(|entry| entry.military_number == number)
    }
}

/// Parses the roster and the trip legs from a report text.
pub fn parse_report(text: &str) -> ParsedReport {
    ParsedReport {
        roster: parse_roster(text),
        trip: parse_trip_legs(text),
    }
}

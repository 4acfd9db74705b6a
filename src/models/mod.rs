//! Core data models for the diária engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod destination;
mod tenure;
mod travel_request;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, CalculationEnvelope, DiariaResult,
};
pub use destination::{Destination, normalize_name};
pub use tenure::TenureBonus;
pub use travel_request::{
    Seniority, TIMESTAMP_FORMAT, TravelRequest, parse_timestamp, timestamp,
};

//! Calculation logic for the diária engine.
//!
//! This module contains the functions that reproduce the per-diem
//! spreadsheet: destination classification, counting full days and the
//! half-day flag, distributing them into paid quantities, the seniority and
//! tenure factors, the unit rate with its location floor, and the total.

mod day_count;
mod destination;
mod diaria;
mod factors;
mod quantities;
mod rounding;
mod total;
mod unit_rate;

pub use day_count::{DayCountResult, HALF_DAY_THRESHOLD_HOURS, count_days};
pub use destination::{DestinationResult, classify_destination};
pub use diaria::calculate_diaria;
pub use factors::{FactorResult, calculate_factors, seniority_factor, tenure_multiplier};
pub use quantities::{QuantityResult, distribute_quantities};
pub use rounding::round_money;
pub use total::{TotalResult, calculate_total};
pub use unit_rate::{UnitRateResult, calculate_unit_rate};

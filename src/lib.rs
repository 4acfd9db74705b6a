//! Per-diem (diária) calculation engine for CBMMG travel payments.
//!
//! This crate reproduces the official diária spreadsheet: it classifies the
//! destination, counts full days and the half-day flag for a trip, applies
//! the seniority and tenure factors to the rank's base daily rate with a
//! location floor, and totals the payment with an audit trace of every step.
//! It also extracts rosters and trip legs from travel report text, and
//! exposes the calculator over HTTP and on the command line.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;

//! Calculation result models for the diária engine.
//!
//! This module contains the [`DiariaResult`] type and the audit structures
//! that record every rule applied while computing a per-diem.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Destination;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
/// `sheet_ref` names the spreadsheet cell or column the rule reproduces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The spreadsheet cell or column reproduced by this rule.
    pub sheet_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use diaria_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The result of one per-diem calculation.
///
/// Field names follow the spreadsheet columns: DI/PA are the day counts,
/// L/M/N the paid quantities, G/H the factors and K the unit rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiariaResult {
    /// Location class of the destination.
    pub destination: Destination,
    /// DI: full days.
    pub full_days: u32,
    /// PA: half-day flag, 0 or 1.
    pub half_days: u32,
    /// L: units paid at the full-day rate.
    pub full_day_units: u32,
    /// M: units paid at the half-day rate.
    pub half_day_units: u32,
    /// N: half-rate lodging surcharge units.
    pub lodging_units: u32,
    /// G: seniority factor.
    pub seniority_factor: Decimal,
    /// H: tenure multiplier.
    pub tenure_multiplier: Decimal,
    /// Base daily rate looked up for the rank.
    pub base_daily_rate: Decimal,
    /// K: unit rate for a full day.
    pub unit_rate: Decimal,
    /// Incidental allowance deducted from each full and half day.
    pub incidental_allowance: Decimal,
    /// Value of one half-day unit: round(K/2 − allowance, 2).
    pub half_day_value: Decimal,
    /// Value of one full-day unit: round(K − allowance, 2).
    pub full_day_value: Decimal,
    /// Value of one lodging unit: round(K/2, 2).
    pub lodging_value: Decimal,
    /// Final amount.
    pub total: Decimal,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}

/// A calculation result stamped with identity and provenance.
///
/// The HTTP API and the CLI return this envelope; [`DiariaResult`] itself
/// stays deterministic for identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationEnvelope {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// Version of the rate tables used.
    pub tables_version: String,
    /// The calculation itself.
    pub result: DiariaResult,
}

impl CalculationEnvelope {
    /// Wraps a result with a fresh id and the current time.
    pub fn new(result: DiariaResult, tables_version: impl Into<String>) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            tables_version: tables_version.into(),
            result,
        }
    }
}

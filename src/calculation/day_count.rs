//! Full-day (DI) and half-day (PA) counting.
//!
//! Reproduces the "CALCULO N DIÁRIAS" sheet: whole days come from the
//! elapsed duration, but crossing a clock-time boundary is decided by
//! comparing the wall-clock times of departure and return.

use chrono::{NaiveDateTime, Timelike};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::round_money;

/// Seconds in a day.
const SECONDS_PER_DAY: i64 = 24 * 3600;

/// Remainder hours at or above this threshold earn a half day (6.00 h).
pub const HALF_DAY_THRESHOLD_HOURS: Decimal = Decimal::from_parts(600, 0, 0, false, 2);

/// The result of counting DI and PA for a trip.
#[derive(Debug, Clone)]
pub struct DayCountResult {
    /// DI: full days.
    pub full_days: u32,
    /// PA: 0 or 1.
    pub half_days: u32,
    /// Whole 24-hour periods in the interval, before any adjustment.
    pub elapsed_days: u32,
    /// Hours left after the whole days, rounded to two places.
    pub remainder_hours: Decimal,
    /// The audit step recording this count.
    pub audit_step: AuditStep,
}

/// Counts full days and the half-day flag for a travel interval.
///
/// - `elapsed_days = floor((end − start) / 24h)`
/// - `remainder_hours = round((end − start) mod 24h, 2)`
/// - if the return clock time is earlier than the departure clock time,
///   DI is `elapsed_days + 1` and PA is 0;
/// - otherwise DI is `elapsed_days` and PA is 1 when the remainder is at
///   least six hours.
///
/// # Errors
///
/// Returns `InvalidRange` unless `end` is after `start`.
///
/// # Examples
///
/// ```
/// use diaria_engine::calculation::count_days;
/// use diaria_engine::models::parse_timestamp;
///
/// let start = parse_timestamp("2026-12-01 06:00").unwrap();
/// let end = parse_timestamp("2026-12-05 18:00").unwrap();
/// let result = count_days(start, end, 1).unwrap();
/// assert_eq!((result.full_days, result.half_days), (4, 1));
/// ```
pub fn count_days(
    start: NaiveDateTime,
    end: NaiveDateTime,
    step_number: u32,
) -> EngineResult<DayCountResult> {
    if end <= start {
        return Err(EngineError::InvalidRange { start, end });
    }

    let elapsed_seconds = (end - start).num_seconds();
    let elapsed_days = (elapsed_seconds / SECONDS_PER_DAY) as u32;
    let remainder_seconds = elapsed_seconds % SECONDS_PER_DAY;
    let remainder_hours = round_money(Decimal::from(remainder_seconds) / Decimal::from(3600));

    let start_clock = start.time();
    let end_clock = end.time();
    let crossed_clock = end_clock < start_clock;

    let (full_days, half_days) = if crossed_clock {
        (elapsed_days + 1, 0)
    } else if remainder_hours >= HALF_DAY_THRESHOLD_HOURS {
        (elapsed_days, 1)
    } else {
        (elapsed_days, 0)
    };

    let reasoning = if crossed_clock {
        format!(
            "{} whole days; return time {} is earlier than departure time {}, adding one full day",
            elapsed_days,
            end_clock.format("%H:%M"),
            start_clock.format("%H:%M")
        )
    } else if half_days == 1 {
        format!(
            "{} whole days; remainder {}h reaches {}h, one half day",
            elapsed_days,
            remainder_hours,
            HALF_DAY_THRESHOLD_HOURS.normalize()
        )
    } else {
        format!(
            "{} whole days; remainder {}h is below {}h, no half day",
            elapsed_days,
            remainder_hours,
            HALF_DAY_THRESHOLD_HOURS.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "day_count".to_string(),
        rule_name: "Full and Half Day Count".to_string(),
        sheet_ref: "CALCULO N DIÁRIAS!B7:C7".to_string(),
        input: serde_json::json!({
            "start": start.format("%Y-%m-%d %H:%M").to_string(),
            "end": end.format("%Y-%m-%d %H:%M").to_string(),
            "start_clock_seconds": start_clock.num_seconds_from_midnight(),
            "end_clock_seconds": end_clock.num_seconds_from_midnight()
        }),
        output: serde_json::json!({
            "elapsed_days": elapsed_days,
            "remainder_hours": remainder_hours.to_string(),
            "di": full_days,
            "pa": half_days
        }),
        reasoning,
    };

    Ok(DayCountResult {
        full_days,
        half_days,
        elapsed_days,
        remainder_hours,
        audit_step,
    })
}

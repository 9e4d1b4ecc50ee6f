//! Token lifetime expressions (`"90"`, `"30m"`, `"1h"`, `"7 days"`).
//!
//! A bare integer is a number of seconds.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration expression")]
    Empty,
    #[error("invalid number in duration expression {0:?}")]
    InvalidNumber(String),
    #[error("unknown duration unit {0:?}")]
    UnknownUnit(String),
    #[error("duration expression {0:?} overflows")]
    Overflow(String),
}

pub fn parse_duration(expr: &str) -> Result<Duration, DurationError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(DurationError::Empty);
    }

    let split = expr
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(expr.len());
    let (number, unit) = expr.split_at(split);

    let value: u64 = number
        .parse()
        .map_err(|_| DurationError::InvalidNumber(expr.to_string()))?;

    let unit = unit.trim().to_ascii_lowercase();
    let millis_per_unit: u64 = match unit.as_str() {
        "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1,
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1_000,
        "m" | "min" | "mins" | "minute" | "minutes" => 60_000,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600_000,
        "d" | "day" | "days" => 86_400_000,
        "w" | "week" | "weeks" => 604_800_000,
        // 365.25 days
        "y" | "yr" | "yrs" | "year" | "years" => 31_557_600_000,
        _ => return Err(DurationError::UnknownUnit(unit)),
    };

    value
        .checked_mul(millis_per_unit)
        .map(Duration::from_millis)
        .ok_or_else(|| DurationError::Overflow(expr.to_string()))
}

//! Parsing of relative and absolute date expressions.
//!
//! Relative expressions count back from "now": `12h`, `7d`, `1.5d`, `3m`,
//! `1y`. Hours and days subtract a fixed duration, months and years step back
//! whole calendar units. Absolute expressions name a year, a month or a day:
//! `2024`, `2024-03`, `2024-03-07`.
//!
//! With `end = false` the result is the first instant of the named unit, with
//! `end = true` the last one.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;

use super::{DateBound, DateParseError, TimeUnit, end_of, start_of, subtract_months, subtract_years};

#[allow(clippy::expect_used)]
static RELATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?\d+(?:\.\d+)?)([hdmy])$").expect("relative date regex is valid") // Static pattern, safe to panic
});

#[allow(clippy::expect_used)]
static ABSOLUTE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:-(\d{1,2})(?:-(\d{1,2}))?)?$").expect("absolute date regex is valid") // Static pattern, safe to panic
});

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Parses a relative or absolute date expression against the current time.
///
/// Expressions ending in `h`, `d`, `m` or `y` are relative, everything else is
/// read as absolute.
///
/// # Errors
///
/// Returns [`DateParseError`] when the expression matches no known format or
/// resolves outside the representable calendar.
pub fn parse_date(input: &str, end: bool) -> Result<DateTime<Utc>, DateParseError> {
    parse_date_at(input, end, Utc::now())
}

/// Same as [`parse_date`] with an explicit "now".
///
/// # Errors
///
/// See [`parse_date`].
pub fn parse_date_at(
    input: &str,
    end: bool,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, DateParseError> {
    let trimmed = input.trim();
    if trimmed.ends_with(['h', 'd', 'm', 'y']) {
        parse_relative_date(trimmed, end, now)
    } else {
        parse_absolute_date(trimmed, end)
    }
}

/// Resolves an optional expression into a filter edge; `None` is unbounded.
///
/// # Errors
///
/// See [`parse_date`].
pub fn parse_bound(input: Option<&str>, end: bool) -> Result<DateBound, DateParseError> {
    input.map_or(Ok(DateBound::Unbounded), |expr| {
        parse_date(expr, end).map(DateBound::At)
    })
}

/// Parses a relative expression such as `3h` or `2m`.
///
/// # Errors
///
/// Returns [`DateParseError`] for an unknown suffix, a malformed count, a
/// fractional count on anything other than days, or an out-of-range result.
pub fn parse_relative_date(
    input: &str,
    end: bool,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, DateParseError> {
    let captures = RELATIVE_PATTERN
        .captures(input)
        .ok_or_else(|| DateParseError::relative(input, "expected a count followed by h, d, m or y"))?;
    let count = &captures[1];
    let unit = &captures[2];

    let (instant, unit) = match unit {
        "h" => {
            let hours = whole_count(input, count)?;
            let delta = TimeDelta::try_hours(hours).ok_or_else(|| DateParseError::out_of_range(input))?;
            (now.checked_sub_signed(delta), TimeUnit::Hour)
        }
        "d" => {
            let days: f64 = count
                .parse()
                .map_err(|_| DateParseError::relative(input, "day count is not a number"))?;
            (now.checked_sub_signed(days_to_delta(input, days)?), TimeUnit::Day)
        }
        "m" => (subtract_months(now, whole_count(input, count)?), TimeUnit::Month),
        "y" => (subtract_years(now, whole_count(input, count)?), TimeUnit::Year),
        _ => return Err(DateParseError::relative(input, "unknown unit")),
    };

    let instant = instant.ok_or_else(|| DateParseError::out_of_range(input))?;
    Ok(if end {
        end_of(instant, unit)
    } else {
        start_of(instant, unit)
    })
}

/// Parses an absolute `YYYY`, `YYYY-MM` or `YYYY-MM-DD` expression.
///
/// # Errors
///
/// Returns [`DateParseError`] when the expression matches none of the three
/// formats or names a date that does not exist (e.g. `2023-02-30`).
pub fn parse_absolute_date(input: &str, end: bool) -> Result<DateTime<Utc>, DateParseError> {
    let captures = ABSOLUTE_PATTERN
        .captures(input)
        .ok_or_else(|| DateParseError::absolute(input, "unrecognized date format"))?;

    let year: i32 = captures[1]
        .parse()
        .map_err(|_| DateParseError::absolute(input, "invalid year"))?;
    let month = optional_component(input, captures.get(2).map(|m| m.as_str()), "month")?;
    let day = optional_component(input, captures.get(3).map(|m| m.as_str()), "day")?;

    let unit = match (month, day) {
        (None, _) => TimeUnit::Year,
        (Some(_), None) => TimeUnit::Month,
        (Some(_), Some(_)) => TimeUnit::Day,
    };
    let date = NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
        .ok_or_else(|| DateParseError::absolute(input, "no such calendar date"))?;
    let start = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| DateParseError::out_of_range(input))?
        .and_utc();

    Ok(if end { end_of(start, unit) } else { start })
}

fn whole_count(input: &str, count: &str) -> Result<i64, DateParseError> {
    if count.contains('.') {
        return Err(DateParseError::relative(
            input,
            "only day counts may be fractional",
        ));
    }
    count
        .parse()
        .map_err(|_| DateParseError::out_of_range(input))
}

#[allow(clippy::cast_possible_truncation)]
fn days_to_delta(input: &str, days: f64) -> Result<TimeDelta, DateParseError> {
    let millis = (days * MILLIS_PER_DAY).round();
    // `as` saturates; anything near i64 bounds is rejected by try_milliseconds.
    if !millis.is_finite() {
        return Err(DateParseError::out_of_range(input));
    }
    TimeDelta::try_milliseconds(millis as i64).ok_or_else(|| DateParseError::out_of_range(input))
}

fn optional_component(
    input: &str,
    raw: Option<&str>,
    label: &str,
) -> Result<Option<u32>, DateParseError> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| DateParseError::absolute(input, format!("invalid {label}")))
    })
    .transpose()
}

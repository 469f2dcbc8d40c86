//! Calendar arithmetic for date filters.
//!
//! Every function here is pure and works on UTC instants so results compare
//! directly against game completion timestamps.
//!
//! - [`start_of`] / [`end_of`] snap an instant to the edges of its hour, day,
//!   month or year. The end of a unit is one [`tick`] before the start of the
//!   next unit, so month lengths and leap years fall out of calendar rollover.
//! - [`subtract_months`] / [`subtract_years`] step back whole calendar units.
//! - [`parse_date`] resolves relative (`3d`, `2m`) and absolute (`2024-03`)
//!   expressions into instants.

mod bound;
mod error;
mod expr;

pub use bound::{DateBound, DateWindow};
pub use error::DateParseError;
pub use expr::{parse_absolute_date, parse_bound, parse_date, parse_date_at, parse_relative_date};

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};

/// Calendar granularity for start/end snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    /// Clock hour.
    Hour,
    /// Calendar day.
    Day,
    /// Calendar month.
    Month,
    /// Calendar year.
    Year,
}

/// Smallest representable step between two instants (one nanosecond).
#[must_use]
pub fn tick() -> TimeDelta {
    TimeDelta::nanoseconds(1)
}

/// Returns the first instant of the unit containing `instant`.
#[must_use]
pub fn start_of(instant: DateTime<Utc>, unit: TimeUnit) -> DateTime<Utc> {
    let date = instant.date_naive();
    let start = match unit {
        TimeUnit::Hour => date.and_hms_opt(instant.hour(), 0, 0),
        TimeUnit::Day => date.and_hms_opt(0, 0, 0),
        TimeUnit::Month => date.with_day(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
        TimeUnit::Year => date.with_ordinal(1).and_then(|d| d.and_hms_opt(0, 0, 0)),
    };
    // Truncation never leaves the representable range, so the fallback is unreachable.
    start.map_or(instant, |naive| naive.and_utc())
}

/// Returns the last instant of the unit containing `instant`.
///
/// This is one [`tick`] before the start of the following unit. For the very
/// last unit chrono can represent, the result is [`DateTime::<Utc>::MAX_UTC`].
#[must_use]
pub fn end_of(instant: DateTime<Utc>, unit: TimeUnit) -> DateTime<Utc> {
    next_start(instant, unit)
        .and_then(|next| next.checked_sub_signed(tick()))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn next_start(instant: DateTime<Utc>, unit: TimeUnit) -> Option<DateTime<Utc>> {
    let start = start_of(instant, unit);
    match unit {
        TimeUnit::Hour => start.checked_add_signed(TimeDelta::hours(1)),
        TimeUnit::Day => start.checked_add_signed(TimeDelta::days(1)),
        TimeUnit::Month => {
            let (year, month) = if start.month() == 12 {
                (start.year().checked_add(1)?, 1)
            } else {
                (start.year(), start.month() + 1)
            };
            first_of_month(i64::from(year), month)
        }
        TimeUnit::Year => first_of_month(i64::from(start.year()) + 1, 1),
    }
}

/// Returns the start of the month lying `months` whole calendar months before
/// the month containing `instant`.
///
/// Negative counts step forward. Returns `None` when the result falls outside
/// the representable calendar.
#[must_use]
pub fn subtract_months(instant: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let index = i64::from(instant.year())
        .checked_mul(12)?
        .checked_add(i64::from(instant.month0()))?
        .checked_sub(months)?;
    let month0 = u32::try_from(index.rem_euclid(12)).ok()?;
    first_of_month(index.div_euclid(12), month0 + 1)
}

/// Returns the start of the year lying `years` whole calendar years before
/// the year containing `instant`.
///
/// Returns `None` when the result falls outside the representable calendar.
#[must_use]
pub fn subtract_years(instant: DateTime<Utc>, years: i64) -> Option<DateTime<Utc>> {
    first_of_month(i64::from(instant.year()).checked_sub(years)?, 1)
}

fn first_of_month(year: i64, month: u32) -> Option<DateTime<Utc>> {
    let year = i32::try_from(year).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

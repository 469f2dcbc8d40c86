//! Inclusive date bounds used as filter edges.

use chrono::{DateTime, Utc};

/// One edge of a date filter.
///
/// `Unbounded` means "no limit on this side": unbounded past when used as a
/// lower edge, unbounded future when used as an upper edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateBound {
    /// No limit on this side.
    #[default]
    Unbounded,
    /// Inclusive limit at the given UTC instant.
    At(DateTime<Utc>),
}

impl DateBound {
    /// Returns the instant for a finite bound.
    #[must_use]
    pub fn instant(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unbounded => None,
            Self::At(instant) => Some(instant),
        }
    }

    /// Returns the bound as milliseconds since the Unix epoch, if finite.
    #[must_use]
    pub fn timestamp_millis(self) -> Option<i64> {
        self.instant().map(|instant| instant.timestamp_millis())
    }
}

impl From<DateTime<Utc>> for DateBound {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::At(instant)
    }
}

/// Inclusive `[lower, upper]` window of instants.
///
/// A window whose lower edge lies after its upper edge is valid and simply
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    lower: DateBound,
    upper: DateBound,
}

impl DateWindow {
    /// A window with no limits on either side.
    pub const UNBOUNDED: Self = Self {
        lower: DateBound::Unbounded,
        upper: DateBound::Unbounded,
    };

    /// Creates a window from its lower and upper edges.
    #[must_use]
    pub fn new(lower: DateBound, upper: DateBound) -> Self {
        Self { lower, upper }
    }

    /// Lower (earliest) edge.
    #[must_use]
    pub fn lower(&self) -> DateBound {
        self.lower
    }

    /// Upper (latest) edge.
    #[must_use]
    pub fn upper(&self) -> DateBound {
        self.upper
    }

    /// Returns true when `instant` lies within the window, edges included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        !self.starts_after(instant) && !self.ends_before(instant)
    }

    /// Returns true when the interval `[start, end]` shares at least one instant
    /// with the window.
    #[must_use]
    pub fn intersects(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= end && !self.is_empty() && !self.starts_after(end) && !self.ends_before(start)
    }

    /// Returns true when both edges are finite and the lower edge lies after
    /// the upper edge.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(
            (self.lower, self.upper),
            (DateBound::At(lower), DateBound::At(upper)) if lower > upper
        )
    }

    fn starts_after(&self, instant: DateTime<Utc>) -> bool {
        matches!(self.lower, DateBound::At(lower) if instant < lower)
    }

    fn ends_before(&self, instant: DateTime<Utc>) -> bool {
        matches!(self.upper, DateBound::At(upper) if instant > upper)
    }
}

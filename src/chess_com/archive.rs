//! Monthly archive references and their date range.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use crate::calendar::{DateWindow, TimeUnit, end_of};

/// Year and month a chess.com archive covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl YearMonth {
    /// First instant of the month.
    #[must_use]
    pub fn start(self) -> Option<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Last instant of the month.
    #[must_use]
    pub fn end(self) -> Option<DateTime<Utc>> {
        self.start().map(|start| end_of(start, TimeUnit::Month))
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

/// URL of one monthly archive, as listed by the archives endpoint.
///
/// The month comes from the trailing `.../{YYYY}/{MM}` path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBatchRef {
    url: String,
    month: Option<YearMonth>,
}

impl ArchiveBatchRef {
    /// Wraps an archive URL and reads its month.
    #[must_use]
    pub fn parse(url: impl Into<String>) -> Self {
        let url = url.into();
        let month = year_month_from_url(&url);
        Self { url, month }
    }

    /// The archive URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The month the archive covers, if the URL names one.
    #[must_use]
    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }

    /// Short label for progress output (`2024/01`, or the URL itself).
    #[must_use]
    pub fn label(&self) -> String {
        self.month
            .map_or_else(|| self.url.clone(), |month| month.to_string())
    }

    /// Returns true when the archive's month shares any instant with `window`.
    ///
    /// An archive whose month is unknown cannot be ruled out and counts as
    /// overlapping.
    #[must_use]
    pub fn overlaps(&self, window: &DateWindow) -> bool {
        match self.month.and_then(|m| Some((m.start()?, m.end()?))) {
            Some((start, end)) => window.intersects(start, end),
            None => true,
        }
    }
}

fn year_month_from_url(raw: &str) -> Option<YearMonth> {
    let path = Url::parse(raw).map_or_else(|_| raw.to_string(), |url| url.path().to_string());
    let mut segments = path.trim_end_matches('/').rsplit('/');
    let month = segments.next()?;
    let year = segments.next()?;

    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    (1..=12).contains(&month).then_some(YearMonth { year, month })
}

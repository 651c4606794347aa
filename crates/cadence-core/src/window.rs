//! Reporting window: a half-open, day-granularity date range.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// The half-open reporting range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    /// First day included in the report.
    pub start: NaiveDate,
    /// First day excluded from the report.
    pub end: NaiveDate,
}

impl ReportWindow {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every calendar day in `[start, end)`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day < end)
    }

    /// The instant the window opens (start day at midnight UTC).
    #[must_use]
    pub fn start_instant(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// The first instant past the window (end day at midnight UTC).
    #[must_use]
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }

    /// True when an instant falls inside the half-open window.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_instant() && at < self.end_instant()
    }
}

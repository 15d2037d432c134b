//! Calendar date utilities.

use std::{fmt, str::FromStr};

use derive_more::{AsRef, Display};
use time::{format_description::BorrowedFormatItem, macros::format_description};

/// Format of a [`Date`] label that can be interpreted as a calendar date.
const FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// Date label, as provided by a user.
///
/// Labels are compared and stored verbatim. Only those matching the
/// `dd/MM/yyyy` format are interpretable as calendar dates via
/// [`Date::to_calendar()`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Date(String);

impl Date {
    /// Creates a new [`Date`] if the given `label` is not blank.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        (!label.trim().is_empty()).then_some(Self(label))
    }

    /// Creates a new [`Date`] out of the provided calendar date.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn from_calendar(date: time::Date) -> Self {
        Self(date.format(FORMAT).expect("infallible"))
    }

    /// Interprets this [`Date`] as a calendar date.
    ///
    /// [`None`] is returned if this [`Date`] doesn't match the `dd/MM/yyyy`
    /// format.
    #[must_use]
    pub fn to_calendar(&self) -> Option<time::Date> {
        time::Date::parse(self.0.trim(), FORMAT).ok()
    }

    /// Returns a [`Date`] being the provided number of `days` after this
    /// one.
    ///
    /// [`None`] is returned if this [`Date`] is not a calendar date, or the
    /// result overflows.
    #[must_use]
    pub fn plus_days(&self, days: u32) -> Option<Self> {
        self.to_calendar()?
            .checked_add(time::Duration::days(days.into()))
            .map(Self::from_calendar)
    }

    /// Returns the number of days passed from this [`Date`] until the
    /// `other` one.
    ///
    /// [`None`] is returned if any of the dates is not a calendar date.
    #[must_use]
    pub fn days_until(&self, other: &Self) -> Option<i64> {
        Some((other.to_calendar()? - self.to_calendar()?).whole_days())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or(ParseError)
    }
}

/// Error of parsing a blank [`Date`].
#[derive(Clone, Copy, Debug, derive_more::Error, Eq, PartialEq)]
pub struct ParseError;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("blank date")
    }
}

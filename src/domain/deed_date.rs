//! DeedDate value object.

use super::errors::ValidationError;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Format used by transcribers in the CSV dataset ("March 3, 1755").
const DEED_DATE_FORMAT: &str = "%B %d, %Y";

/// Format used by the index mapping and range filters.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Marker transcribers use for dates missing from the deed.
const NOT_SPECIFIED: &str = "Not specified";

/// A calendar date on a deed (execution or recording).
///
/// # Example
///
/// ```
/// use deed_archive::domain::DeedDate;
///
/// let date = DeedDate::normalize("March 3, 1755").unwrap();
/// assert_eq!(date.to_string(), "1755-03-03");
/// assert!(DeedDate::normalize("Not specified").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeedDate(NaiveDate);

impl DeedDate {
    /// Lower edge of the default range filter window.
    pub fn window_start() -> Self {
        Self(NaiveDate::from_ymd_opt(1720, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    /// Upper edge of the default range filter window.
    pub fn window_end() -> Self {
        Self(NaiveDate::from_ymd_opt(1780, 12, 31).unwrap_or(NaiveDate::MAX))
    }

    /// Normalize a transcribed date cell.
    ///
    /// Empty cells, cells containing "Not specified" and anything that does not
    /// parse as "Month D, YYYY" become `None`; nothing here is an error.
    pub fn normalize(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains(NOT_SPECIFIED) {
            return None;
        }
        NaiveDate::parse_from_str(raw, DEED_DATE_FORMAT).ok().map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` date, as typed into a search filter.
    pub fn parse_iso(raw: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
    }

    /// Get the underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DeedDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DeedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

// Serialized in the index's yyyy-MM-dd format
impl Serialize for DeedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

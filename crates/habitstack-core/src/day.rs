//! Calendar-day tokens.
//!
//! Completions are tracked at calendar-day granularity with no timezone.
//! A [`DayKey`] serializes as a normalized `YYYY-MM-DD` string, so a habit's
//! completion set can never hold the same day twice.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Normalized calendar day (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year/month/day, returning `None` for impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a `YYYY-MM-DD` token.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDay(s.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Shift by a signed number of days. `None` only at the edges of the
    /// representable calendar.
    pub fn offset(&self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    pub fn previous(&self) -> Option<Self> {
        self.offset(-1)
    }

    /// Falls within the given year and month.
    pub fn same_month(&self, year: i32, month: u32) -> bool {
        self.0.year() == year && self.0.month() == month
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_are_normalized() {
        let day = DayKey::parse("2025-11-26").unwrap();
        assert_eq!(day.to_string(), "2025-11-26");
        assert_eq!(DayKey::parse(" 2025-11-26 ").unwrap(), day);
    }

    #[test]
    fn parse_rejects_garbage_and_impossible_dates() {
        assert!(matches!(
            DayKey::parse("26/11/2025"),
            Err(ValidationError::InvalidDay(_))
        ));
        assert!(DayKey::parse("2025-02-30").is_err());
    }

    #[test]
    fn offset_crosses_month_and_year_boundaries() {
        let day = DayKey::from_ymd(2025, 1, 1).unwrap();
        assert_eq!(day.previous().unwrap().to_string(), "2024-12-31");
        assert_eq!(day.offset(31).unwrap().to_string(), "2025-02-01");
    }

    #[test]
    fn offset_returns_none_at_calendar_edge() {
        let day = DayKey::new(NaiveDate::MIN);
        assert!(day.previous().is_none());
    }

    #[test]
    fn serializes_as_plain_string() {
        let day = DayKey::from_ymd(2025, 12, 6).unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"2025-12-06\"");
        let back: DayKey = serde_json::from_str("\"2025-12-06\"").unwrap();
        assert_eq!(back, day);
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Canonical identifier of one calendar day.
///
/// The string form is `"<year>-<month>-<day>"` with 1-based, unpadded month
/// and day (`"2024-3-5"`), which is what existing `events.json` files use as
/// map keys. Ordering is chronological.
///
/// Only the ranges of month (1-12) and day (1-31) are checked, so a key
/// such as `1990-2-29` can anchor a yearly entry without naming a real day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    // field order gives the chronological Ord
    year: i32,
    month: u32,
    day: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDateKeyError {
    #[error("date key `{0}` is not of the form <year>-<month>-<day>")]
    Format(String),
    #[error("date key `{0}` has a month or day out of range")]
    OutOfRange(String),
}

impl DateKey {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { year, month, day })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// The calendar day this key names, if it names one.
    pub fn date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ParseDateKeyError::Format(s.to_string());

        // Split from the right so a negative year keeps its sign.
        let mut parts = s.trim().rsplitn(3, '-');
        let day = parts.next().ok_or_else(format_err)?;
        let month = parts.next().ok_or_else(format_err)?;
        let year = parts.next().ok_or_else(format_err)?;

        let year: i32 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;
        let day: u32 = day.parse().map_err(|_| format_err())?;

        Self::new(year, month, day).ok_or_else(|| ParseDateKeyError::OutOfRange(s.to_string()))
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_padding() {
        let key = DateKey::new(2024, 3, 5).expect("valid key");
        assert_eq!(key.to_string(), "2024-3-5");
    }

    #[test]
    fn parses_padded_and_unpadded_forms() {
        let a: DateKey = "2024-3-5".parse().expect("unpadded");
        let b: DateKey = "2024-03-05".parse().expect("padded");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2024-3-5");
    }

    #[test]
    fn rejects_out_of_range_parts() {
        assert_eq!(
            "2024-2-32".parse::<DateKey>(),
            Err(ParseDateKeyError::OutOfRange("2024-2-32".to_string()))
        );
        assert!("2024-13-1".parse::<DateKey>().is_err());
        assert!("2024-0-1".parse::<DateKey>().is_err());
        assert!("2024-3".parse::<DateKey>().is_err());
        assert!("abc-1-1".parse::<DateKey>().is_err());
    }

    #[test]
    fn leap_day_of_common_year_is_a_key_but_not_a_date() {
        let key: DateKey = "1990-2-29".parse().expect("in range");
        assert_eq!((key.month(), key.day()), (2, 29));
        assert_eq!(key.date(), None);
        assert!(DateKey::new(2024, 2, 29).and_then(DateKey::date).is_some());
    }

    #[test]
    fn orders_chronologically() {
        let earlier = DateKey::new(2024, 2, 29).expect("valid key");
        let later = DateKey::new(2024, 10, 1).expect("valid key");
        assert!(earlier < later);
        // string order would put "2024-10-1" first
        assert!(earlier.to_string() > later.to_string());
    }

    #[test]
    fn converts_from_native_dates() {
        let date = NaiveDate::from_ymd_opt(1990, 12, 31).expect("valid date");
        let key = DateKey::from(date);
        assert_eq!((key.year(), key.month(), key.day()), (1990, 12, 31));
        assert_eq!(key.date(), Some(date));
    }
}

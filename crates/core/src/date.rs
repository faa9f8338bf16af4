// SPDX-License-Identifier: MIT

//!
//! The calendar date type and the date primitives the resolver is built on
//!

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// The minimum year a [`CalendarDate`] can hold
pub const MIN_YEAR: i64 = -9999;

/// The maximum year a [`CalendarDate`] can hold
pub const MAX_YEAR: i64 = 9999;

/// Errors that can arise in relation to a [`CalendarDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The day number is not allowed (must be 1 <= day <= 31)
    #[error("Day `{0}` is not allowed")]
    InvalidDay(i64),

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(i64),

    /// The year is not allowed (must be [`MIN_YEAR`] <= year <= [`MAX_YEAR`])
    #[error("Year `{0}` is not allowed")]
    InvalidYear(i64),

    /// The grid column is not allowed (must be 0 <= day of week <= 6)
    #[error("Day of week `{0}` is not allowed")]
    InvalidDayOfWeek(i64),

    /// Each part is in bounds but the day does not exist (e.g. 30th Feb)
    #[error("{year}-{month:02}-{day:02} does not exist")]
    NonExistent { year: i64, month: i64, day: i64 },

    /// Not a `YYYY-MM-DD` string
    #[error("Unable to parse date `{0}`")]
    Parse(String),
}

/// The day of the month (1 to 31)
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DayOfMonth(u8);

/// The month of the year (1 to 12)
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Month(u8);

/// The year
///
/// The minimum year allowed is [`MIN_YEAR`].  The maximum year allowed is
/// [`MAX_YEAR`]
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Year(i32);

/// The column a day occupies in the displayed week (0 is the first column, 6
/// the last).  Supplied by whoever lays out the grid.
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfMonth {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Month {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Year {
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl DayOfWeek {
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether the day sits in the first column of the week
    pub fn is_first_of_week(&self) -> bool {
        self.0 == 0
    }

    /// Whether the day sits in the last column of the week
    pub fn is_last_of_week(&self) -> bool {
        self.0 == 6
    }
}

impl TryFrom<i64> for DayOfMonth {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=31).contains(&value) {
            Ok(DayOfMonth(value as u8))
        } else {
            Err(DateError::InvalidDay(value))
        }
    }
}

impl TryFrom<i64> for Month {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=12).contains(&value) {
            Ok(Month(value as u8))
        } else {
            Err(DateError::InvalidMonth(value))
        }
    }
}

impl TryFrom<i64> for Year {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_YEAR..=MAX_YEAR).contains(&value) {
            Ok(Year(value as i32))
        } else {
            Err(DateError::InvalidYear(value))
        }
    }
}

impl TryFrom<i64> for DayOfWeek {
    type Error = DateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (0..=6).contains(&value) {
            Ok(DayOfWeek(value as u8))
        } else {
            Err(DateError::InvalidDayOfWeek(value))
        }
    }
}

impl<'de> Deserialize<'de> for DayOfMonth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        DayOfMonth::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Month::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Year {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        Year::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        DayOfWeek::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// A calendar day (year, month, day) with no time of day and no time zone, so
/// comparisons never straddle a DST change or a midnight boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Create a new [`CalendarDate`] if the day exists.  Months are 1 based.
    pub fn from_ymd(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        let year = Year::try_from(year)?;
        let month = Month::try_from(month)?;
        let day = DayOfMonth::try_from(day)?;
        NaiveDate::from_ymd_opt(year.value(), month.value().into(), day.value().into())
            .map(CalendarDate)
            .ok_or(DateError::NonExistent {
                year: year.value().into(),
                month: month.value().into(),
                day: day.value().into(),
            })
    }

    /// Today's date according to the local clock.
    ///
    /// The resolver never calls this; callers read it once per render pass
    /// and hand it over.
    pub fn today() -> Self {
        CalendarDate(Local::now().date_naive())
    }

    /// Parse a `YYYY-MM-DD` string
    pub fn parse_iso(string: &str) -> Result<Self, DateError> {
        let date = NaiveDate::parse_from_str(string.trim(), "%Y-%m-%d")
            .map_err(|_| DateError::Parse(string.to_string()))?;
        CalendarDate::try_from(date)
    }

    /// Get the day of the month
    pub fn day(&self) -> DayOfMonth {
        DayOfMonth(self.0.day() as u8)
    }

    /// Get the month
    pub fn month(&self) -> Month {
        Month(self.0.month() as u8)
    }

    /// Get the year
    pub fn year(&self) -> Year {
        Year(self.0.year())
    }

    /// The underlying chrono date
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Whether both dates fall on the same calendar day
    pub fn is_same_day(&self, other: &CalendarDate) -> bool {
        self.0 == other.0
    }

    /// Whether `self` falls strictly before `other`
    pub fn is_before(&self, other: &CalendarDate) -> bool {
        self.0 < other.0
    }

    /// Whether `self` falls strictly after `other`
    pub fn is_after(&self, other: &CalendarDate) -> bool {
        self.0 > other.0
    }

    /// Whether `self` lies in the interval, bounds included.  The bounds may
    /// be given in either order.
    pub fn is_within_interval(&self, start: &CalendarDate, end: &CalendarDate) -> bool {
        let (low, high) = match start.cmp(end) {
            Ordering::Greater => (end, start),
            _ => (start, end),
        };
        low.0 <= self.0 && self.0 <= high.0
    }

    /// Signed number of whole days from `other` to `self` (positive when
    /// `self` is later)
    pub fn difference_in_days(&self, other: &CalendarDate) -> i64 {
        self.0.signed_duration_since(other.0).num_days()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;
    fn try_from(value: NaiveDate) -> Result<Self, Self::Error> {
        Year::try_from(i64::from(value.year()))?;
        Ok(CalendarDate(value))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Either of the two accepted JSON forms of a date
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Iso(String),
    Parts { year: i64, month: i64, day: i64 },
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let date = match RawDate::deserialize(deserializer)? {
            RawDate::Iso(string) => CalendarDate::parse_iso(&string),
            RawDate::Parts { year, month, day } => CalendarDate::from_ymd(year, month, day),
        };
        date.map_err(serde::de::Error::custom)
    }
}

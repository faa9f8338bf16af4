// SPDX-License-Identifier: MIT

//!
//! Ranges of days of the month that recur every month
//!

use super::{RangePosition, sorted_members};
use crate::style::lenient_colour;
use crate::{Colour, DEFAULT_MONTH_RANGE_BACKGROUND, DEFAULT_RANGE_TEXT, DayOfMonth};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Colours for a month range.  `color` takes priority over `textColor`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeStyle {
    #[serde(deserialize_with = "lenient_colour")]
    pub background_color: Option<Colour>,

    #[serde(deserialize_with = "lenient_colour")]
    pub color: Option<Colour>,

    #[serde(deserialize_with = "lenient_colour")]
    pub text_color: Option<Colour>,
}

impl RangeStyle {
    /// The background, falling back to [`DEFAULT_MONTH_RANGE_BACKGROUND`]
    pub fn background(&self) -> Colour {
        self.background_color
            .clone()
            .unwrap_or_else(|| Colour::constant(DEFAULT_MONTH_RANGE_BACKGROUND))
    }

    /// The text colour, falling back to [`DEFAULT_RANGE_TEXT`]
    pub fn text(&self) -> Colour {
        self.color
            .clone()
            .or_else(|| self.text_color.clone())
            .unwrap_or_else(|| Colour::constant(DEFAULT_RANGE_TEXT))
    }
}

/// Days of the month (kept only if 1 to 31, sorted, without duplicates) and
/// how to draw them
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthRangeEntry {
    range: Vec<i64>,
    style: RangeStyle,
}

impl MonthRangeEntry {
    /// Create an entry, dropping days outside 1 to 31
    pub fn from(range: Vec<i64>, style: RangeStyle) -> Self {
        let mut range: Vec<i64> = range
            .into_iter()
            .filter(|day| (1..=31).contains(day))
            .collect();
        range.sort_unstable();
        range.dedup();
        MonthRangeEntry { range, style }
    }

    /// The days of the month, sorted
    pub fn range(&self) -> &[i64] {
        &self.range
    }

    pub fn style(&self) -> &RangeStyle {
        &self.style
    }
}

#[derive(Deserialize)]
struct RawMonthRangeEntry {
    range: Value,
    #[serde(default)]
    style: Option<RangeStyle>,
}

/// Month ranges in the order they were configured
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthRanges(Vec<MonthRangeEntry>);

impl MonthRanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: MonthRangeEntry) {
        self.0.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthRangeEntry> {
        self.0.iter()
    }
}

impl FromIterator<MonthRangeEntry> for MonthRanges {
    fn from_iter<I: IntoIterator<Item = MonthRangeEntry>>(iter: I) -> Self {
        MonthRanges(iter.into_iter().collect())
    }
}

// Unusable entries are logged and skipped, never an error
impl<'de> Deserialize<'de> for MonthRanges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<Value>::deserialize(deserializer)?;
        let entries = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<RawMonthRangeEntry>(value) {
                Ok(RawMonthRangeEntry {
                    range: Value::Array(members),
                    style,
                }) => Some(MonthRangeEntry::from(
                    sorted_members(&members),
                    style.unwrap_or_default(),
                )),
                Ok(_) => {
                    warn!("Skipping month range whose `range` is not an array");
                    None
                }
                Err(error) => {
                    warn!("Skipping month range: {error}");
                    None
                }
            })
            .collect();
        Ok(MonthRanges(entries))
    }
}

/// The month range that covers a day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthRangeMatch {
    pub style: RangeStyle,
    pub position: RangePosition,
}

impl MonthRangeMatch {
    /// The range has exactly one day
    pub fn is_single_day(&self) -> bool {
        self.position.is_single_day()
    }
}

/// Find the first entry whose days include `day`
pub fn find_month_range(day: DayOfMonth, month_ranges: &MonthRanges) -> Option<MonthRangeMatch> {
    let day = i64::from(day.value());
    month_ranges
        .iter()
        .find(|entry| entry.range.binary_search(&day).is_ok())
        .map(|entry| MonthRangeMatch {
            style: entry.style.clone(),
            position: RangePosition::within(day, &entry.range),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use calendar_picker_macros::day_of_month;

    fn colour(colour: &str) -> Colour {
        Colour::from(colour).unwrap()
    }

    #[test]
    fn positions() {
        let ranges = MonthRanges::from_iter([MonthRangeEntry::from(
            vec![7, 5, 6],
            RangeStyle::default(),
        )]);

        let start = find_month_range(day_of_month!(5), &ranges).unwrap();
        assert!(start.position.is_start && !start.position.is_end);

        let middle = find_month_range(day_of_month!(6), &ranges).unwrap();
        assert!(!middle.position.is_start && !middle.position.is_end);

        let end = find_month_range(day_of_month!(7), &ranges).unwrap();
        assert!(!end.position.is_start && end.position.is_end);

        assert!(find_month_range(day_of_month!(8), &ranges).is_none());
    }

    #[test]
    fn out_of_bounds_members_are_dropped() {
        let ranges = MonthRanges::from_iter([
            MonthRangeEntry::from(vec![0, 32, -4], RangeStyle::default()),
            MonthRangeEntry::from(vec![0, 10, 40], RangeStyle::default()),
        ]);

        // Dropping 0 and 40 leaves a single day
        let single = find_month_range(day_of_month!(10), &ranges).unwrap();
        assert!(single.is_single_day());
        assert!(find_month_range(day_of_month!(1), &ranges).is_none());
        assert!(find_month_range(day_of_month!(31), &ranges).is_none());
    }

    #[test]
    fn duplicates_make_a_single_day() {
        let ranges = MonthRanges::from_iter([MonthRangeEntry::from(
            vec![5, 5],
            RangeStyle::default(),
        )]);
        assert!(find_month_range(day_of_month!(5), &ranges).unwrap().is_single_day());
    }

    #[test]
    fn style_defaults() {
        let style = RangeStyle::default();
        assert_eq!(style.background(), colour(DEFAULT_MONTH_RANGE_BACKGROUND));
        assert_eq!(style.text(), colour(DEFAULT_RANGE_TEXT));

        let style = RangeStyle {
            background_color: Some(colour("#fff")),
            color: Some(colour("black")),
            text_color: Some(colour("grey")),
        };
        assert_eq!(style.background(), colour("#fff"));
        assert_eq!(style.text(), colour("black"));

        let style = RangeStyle {
            text_color: Some(colour("grey")),
            ..Default::default()
        };
        assert_eq!(style.text(), colour("grey"));
    }

    #[test]
    fn deserialise_skips_malformed_entries() {
        let ranges: MonthRanges = serde_json::from_str(
            r##"[
                null,
                {"range": "5-7"},
                {"range": []},
                {"style": {"backgroundColor": "red"}},
                {"range": [5, 6, 7], "style": {"backgroundColor": "#fff"}}
            ]"##,
        )
        .unwrap();

        let found = find_month_range(day_of_month!(6), &ranges).unwrap();
        assert_eq!(found.style.background(), colour("#fff"));
    }
}

// SPDX-License-Identifier: MIT

//!
//! Named coloured ranges whose members are day numbers counted from a
//! schedule start date (day 1 is the schedule start)
//!

use super::{RangePosition, sorted_members};
use crate::{CalendarDate, Colour, DEFAULT_RANGE_TEXT};
use log::warn;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// The ranges drawn in one colour
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColouredRange {
    colour: Colour,
    ranges: Vec<Vec<i64>>,
    text_colour: Option<Colour>,
}

impl ColouredRange {
    /// Create a coloured range.  Empty sub-ranges are dropped and the rest
    /// sorted without duplicates.
    pub fn from(colour: Colour, ranges: Vec<Vec<i64>>, text_colour: Option<Colour>) -> Self {
        let ranges = ranges
            .into_iter()
            .filter(|range| !range.is_empty())
            .map(|mut range| {
                range.sort_unstable();
                range.dedup();
                range
            })
            .collect();
        ColouredRange {
            colour,
            ranges,
            text_colour,
        }
    }

    /// The background colour
    pub fn colour(&self) -> &Colour {
        &self.colour
    }

    /// The sub-ranges, each sorted
    pub fn ranges(&self) -> &[Vec<i64>] {
        &self.ranges
    }

    /// The text colour, falling back to [`DEFAULT_RANGE_TEXT`]
    pub fn text_colour(&self) -> Colour {
        self.text_colour
            .clone()
            .unwrap_or_else(|| Colour::constant(DEFAULT_RANGE_TEXT))
    }
}

/// All coloured ranges, in the order they were configured
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColouredRanges(Vec<ColouredRange>);

impl ColouredRanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a colour after those already present
    pub fn push(&mut self, coloured_range: ColouredRange) {
        self.0.push(coloured_range);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColouredRange> {
        self.0.iter()
    }
}

impl FromIterator<ColouredRange> for ColouredRanges {
    fn from_iter<I: IntoIterator<Item = ColouredRange>>(iter: I) -> Self {
        ColouredRanges(iter.into_iter().collect())
    }
}

/// The coloured range that covers a day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColouredRangeMatch {
    pub colour: Colour,
    pub text_colour: Colour,
    pub position: RangePosition,
}

/// The 1 based day number of `date` counted from `schedule_start`
pub fn day_number(date: CalendarDate, schedule_start: CalendarDate) -> i64 {
    date.difference_in_days(&schedule_start) + 1
}

/// Find the first sub-range (colours in order, then sub-ranges in order) that
/// contains `day_number`
pub fn find_coloured_range(
    day_number: i64,
    coloured_ranges: &ColouredRanges,
) -> Option<ColouredRangeMatch> {
    if day_number == 0 {
        return None;
    }
    coloured_ranges.iter().find_map(|coloured_range| {
        coloured_range
            .ranges
            .iter()
            .find(|range| range.binary_search(&day_number).is_ok())
            .map(|range| ColouredRangeMatch {
                colour: coloured_range.colour.clone(),
                text_colour: coloured_range.text_colour(),
                position: RangePosition::within(day_number, range),
            })
    })
}

/// Parse the value for one colour: `{"ranges": [[..]], "textColor": ..}` or
/// just the array of ranges.  Returns `None` (after logging) if unusable.
fn parse_coloured_range(colour: Colour, value: &Value) -> Option<ColouredRange> {
    let (ranges, text_colour) = match value {
        Value::Array(ranges) => (ranges, None),
        Value::Object(config) => match config.get("ranges") {
            Some(Value::Array(ranges)) => (ranges, config.get("textColor")),
            _ => {
                warn!("Coloured range `{colour}` has no `ranges` array");
                return None;
            }
        },
        _ => {
            warn!("Coloured range `{colour}` is neither an object nor an array");
            return None;
        }
    };

    let text_colour = text_colour
        .and_then(Value::as_str)
        .and_then(|text_colour| Colour::from(text_colour).ok());

    let ranges = ranges
        .iter()
        .filter_map(|range| match range {
            Value::Array(members) => Some(sorted_members(members)),
            other => {
                warn!("Coloured range `{colour}` has a non-array sub-range {other}");
                None
            }
        })
        .collect();

    Some(ColouredRange::from(colour, ranges, text_colour))
}

struct ColouredRangesVisitor;

impl<'de> Visitor<'de> for ColouredRangesVisitor {
    type Value = ColouredRanges;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of colours to ranges")
    }

    // Walk the map by hand so the configured order of colours is kept
    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut coloured_ranges = ColouredRanges::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            let Ok(colour) = Colour::from(&key) else {
                warn!("Skipping coloured range with an empty colour");
                continue;
            };
            if let Some(coloured_range) = parse_coloured_range(colour, &value) {
                coloured_ranges.push(coloured_range);
            }
        }
        Ok(coloured_ranges)
    }
}

impl<'de> Deserialize<'de> for ColouredRanges {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ColouredRangesVisitor)
    }
}

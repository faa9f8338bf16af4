// SPDX-License-Identifier: MIT

//!
//! The verdict the resolver produces for one day cell
//!

use crate::{CalendarDate, Colours, ConstraintVerdict, StyleStack};
use serde::Serialize;

/// Which highlight system decided the day's final appearance
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum HighlightSource {
    #[default]
    None,
    Today,
    SingleSelect,
    RangeSelect,
    ColouredRange,
    MonthRange,
    Custom,
}

/// How the selection background of the cell is rounded
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// A band with no rounded edges (inside a range)
    Square,
    Circle,
    RoundLeft,
    RoundRight,
    RoundBoth,
    /// No selection background at all
    #[default]
    NoRound,
}

impl Shape {
    /// The shape of a band given which of its edges are rounded
    pub fn from_edges(round_left: bool, round_right: bool) -> Self {
        match (round_left, round_right) {
            (true, true) => Shape::RoundBoth,
            (true, false) => Shape::RoundLeft,
            (false, true) => Shape::RoundRight,
            (false, false) => Shape::Square,
        }
    }
}

/// What the presenter passes to its `onPressDay` callback
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PressDay {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl From<CalendarDate> for PressDay {
    fn from(value: CalendarDate) -> Self {
        PressDay {
            year: value.year().value(),
            month: value.month().value(),
            day: value.day().value(),
        }
    }
}

/// Everything the presenter needs to draw a day cell
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayVerdict {
    pub date: CalendarDate,

    /// The individual constraint checks
    pub constraints: ConstraintVerdict,

    pub is_out_of_range: bool,
    pub is_today: bool,
    pub is_selected_start: bool,
    pub is_selected_end: bool,
    pub is_in_range: bool,

    pub highlight_source: HighlightSource,
    pub shape: Shape,

    /// Colours set explicitly (rather than through theme slots)
    pub applied_colours: Colours,

    /// The range start text style wins over the disabled text style
    pub override_disabled_text_style: bool,

    /// The cell responds to taps
    pub interactive: bool,

    /// Outer wrapper styles, bottom first
    pub wrapper: StyleStack,

    /// Day button styles, bottom first
    pub container: StyleStack,

    /// Label styles, bottom first
    pub text: StyleStack,
}

impl DayVerdict {
    /// The payload for `onPressDay`, if the cell can be tapped
    pub fn press_target(&self) -> Option<PressDay> {
        self.interactive.then(|| PressDay::from(self.date))
    }
}

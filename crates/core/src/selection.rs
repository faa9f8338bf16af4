// SPDX-License-Identifier: MIT

//!
//! The selection made so far, as owned by the calendar container
//!

use crate::CalendarDate;
use serde::{Deserialize, Serialize};

/// The selection state.  The resolver only reads it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionState {
    pub selected_start_date: Option<CalendarDate>,
    pub selected_end_date: Option<CalendarDate>,
    pub allow_range_selection: bool,
    pub allow_backward_range_select: bool,
}

impl SelectionState {
    /// Select a single day (range selection off)
    pub fn single(date: CalendarDate) -> Self {
        SelectionState {
            selected_start_date: Some(date),
            ..Default::default()
        }
    }

    /// A range selection that has a start and, possibly, an end
    pub fn range(start: CalendarDate, end: Option<CalendarDate>) -> Self {
        SelectionState {
            selected_start_date: Some(start),
            selected_end_date: end,
            allow_range_selection: true,
            allow_backward_range_select: false,
        }
    }

    /// Allow the end of a range to be picked before its start
    pub fn with_backward_select(mut self) -> Self {
        self.allow_backward_range_select = true;
        self
    }

    /// The start date
    pub fn start(&self) -> Option<CalendarDate> {
        self.selected_start_date
    }

    /// The end date.  An end without a start is ignored.
    pub fn end(&self) -> Option<CalendarDate> {
        self.selected_start_date.and(self.selected_end_date)
    }

    /// Both ends of a confirmed range
    pub fn confirmed_range(&self) -> Option<(CalendarDate, CalendarDate)> {
        self.start().zip(self.end())
    }

    /// The start of a range whose end is still to be picked
    pub fn pending_start(&self) -> Option<CalendarDate> {
        match (self.allow_range_selection, self.start(), self.end()) {
            (true, Some(start), None) => Some(start),
            _ => None,
        }
    }

    /// Whether `date` is the selected start
    pub fn is_start(&self, date: CalendarDate) -> bool {
        self.start().is_some_and(|start| start.is_same_day(&date))
    }

    /// Whether `date` is the selected end
    pub fn is_end(&self, date: CalendarDate) -> bool {
        self.end().is_some_and(|end| end.is_same_day(&date))
    }

    /// Whether `date` lies in the confirmed range, bounds included
    pub fn is_in_range(&self, date: CalendarDate) -> bool {
        self.confirmed_range()
            .is_some_and(|(start, end)| date.is_within_interval(&start, &end))
    }
}

// SPDX-License-Identifier: MIT

//!
//! Decide whether a day can be picked: date bounds, disabled dates, and the
//! duration rules of an in-progress range selection
//!

use crate::{CalendarDate, DisabledDates, SelectionState};
use serde::{Deserialize, Serialize};

/// A duration limit for the range being selected
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum RangeDuration {
    /// Applies to every selection
    Uniform(i64),

    /// Applies only when the selection starts on the entry's date
    PerStartDate(Vec<DurationEntry>),
}

/// A duration limit keyed by the start date of the selection
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DurationEntry {
    pub date: CalendarDate,

    #[serde(alias = "minDuration", alias = "maxDuration")]
    pub duration: i64,
}

impl RangeDuration {
    /// The limit that applies to a selection starting on `start`.  A uniform
    /// limit of zero counts as no limit.
    pub fn limit_for(&self, start: CalendarDate) -> Option<i64> {
        match self {
            RangeDuration::Uniform(0) => None,
            RangeDuration::Uniform(duration) => Some(*duration),
            RangeDuration::PerStartDate(entries) => entries
                .iter()
                .find(|entry| entry.date.is_same_day(&start))
                .map(|entry| entry.duration),
        }
    }
}

/// Limits on which days can be picked, supplied per render
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub disabled_dates: Option<DisabledDates>,
    pub min_range_duration: Option<RangeDuration>,
    pub max_range_duration: Option<RangeDuration>,
}

/// Why (if at all) a day can't be picked
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintVerdict {
    pub is_before_min: bool,
    pub is_after_max: bool,
    pub is_disabled: bool,
    pub is_range_too_short: bool,
    pub is_range_too_long: bool,
}

impl ConstraintVerdict {
    /// Whether any of the constraints rule the day out
    pub fn is_out_of_range(&self) -> bool {
        self.is_before_min
            || self.is_after_max
            || self.is_disabled
            || self.is_range_too_short
            || self.is_range_too_long
    }
}

/// Evaluate every constraint for `date`
pub fn evaluate(
    date: CalendarDate,
    constraints: &Constraints,
    selection: &SelectionState,
) -> ConstraintVerdict {
    let mut verdict = ConstraintVerdict {
        is_after_max: constraints.max_date.is_some_and(|max| date.is_after(&max)),
        is_before_min: constraints.min_date.is_some_and(|min| date.is_before(&min)),
        is_disabled: constraints
            .disabled_dates
            .as_ref()
            .is_some_and(|disabled| disabled.contains(date)),
        ..Default::default()
    };

    // Duration rules only judge candidate end dates
    if let Some(start) = selection.pending_start() {
        let signed = date.difference_in_days(&start);
        let difference = if selection.allow_backward_range_select {
            signed.abs()
        } else {
            signed
        };

        if let Some(max) = constraints
            .max_range_duration
            .as_ref()
            .and_then(|duration| duration.limit_for(start))
        {
            verdict.is_range_too_long = difference > max;
        }

        if let Some(min) = constraints
            .min_range_duration
            .as_ref()
            .and_then(|duration| duration.limit_for(start))
        {
            verdict.is_range_too_short = difference < min;
        }

        if !selection.allow_backward_range_select && difference < 0 {
            verdict.is_range_too_short = true;
        }
    }

    verdict
}

// SPDX-License-Identifier: MIT

//!
//! Per-date style overrides
//!

use crate::{CalendarDate, Colours, DateLookup, Dated, StyleStack};
use serde::{Deserialize, Serialize};

/// A style override for one date
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomDateStyle {
    pub date: CalendarDate,

    /// Layered beneath the day's computed style
    #[serde(default)]
    pub style: Option<Colours>,

    /// Applied to the cell's outer wrapper
    #[serde(default)]
    pub container_style: Option<Colours>,

    /// Layered beneath the day's computed text style
    #[serde(default)]
    pub text_style: Option<Colours>,

    /// Keep the override even when the day can't be picked
    #[serde(default)]
    pub allow_disabled: bool,
}

impl CustomDateStyle {
    /// An override for `date` that sets nothing yet
    pub fn new(date: CalendarDate) -> Self {
        CustomDateStyle {
            date,
            style: None,
            container_style: None,
            text_style: None,
            allow_disabled: false,
        }
    }
}

impl Dated for CustomDateStyle {
    fn date(&self) -> CalendarDate {
        self.date
    }
}

/// Custom styles, either listed per date or produced by a rule
pub type CustomDatesStyles = DateLookup<CustomDateStyle>;

/// The custom style found for a day.  Fields are empty stacks, rather than
/// absent, when there is no override.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomStyleMatch {
    pub style: StyleStack,
    pub container: StyleStack,
    pub text: StyleStack,
    pub allow_disabled: bool,
}

impl CustomStyleMatch {
    /// Whether a (non-empty) `style` override was found
    pub fn has_style(&self) -> bool {
        !self.style.is_empty()
    }

    /// The override as it applies to a day that can't be picked: dropped
    /// entirely unless `allow_disabled` was set
    pub fn for_disabled_day(self) -> Self {
        if self.allow_disabled {
            self
        } else {
            CustomStyleMatch::default()
        }
    }
}

impl From<CustomDateStyle> for CustomStyleMatch {
    fn from(value: CustomDateStyle) -> Self {
        let stack = |colours: &Option<Colours>| {
            let mut stack = StyleStack::new();
            stack.push_colours(colours);
            stack
        };
        CustomStyleMatch {
            style: stack(&value.style),
            container: stack(&value.container_style),
            text: stack(&value.text_style),
            allow_disabled: value.allow_disabled,
        }
    }
}

/// Find the custom style for `date`
pub fn find_custom_style(
    date: CalendarDate,
    custom_dates_styles: Option<&CustomDatesStyles>,
) -> CustomStyleMatch {
    custom_dates_styles
        .and_then(|lookup| lookup.find(date))
        .map(CustomStyleMatch::from)
        .unwrap_or_default()
}

// SPDX-License-Identifier: MIT

//!
//! Lookups that find which configured highlight (if any) covers a day
//!

mod coloured;
mod custom;
mod month;

pub use coloured::*;
pub use custom::*;
pub use month::*;

use log::warn;
use serde_json::Value;

/// A whole number, whether written as `5` or `5.0`
fn whole_number(member: &Value) -> Option<i64> {
    member.as_i64().or_else(|| {
        member
            .as_f64()
            .filter(|float| {
                float.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(float)
            })
            .map(|float| float as i64)
    })
}

/// Pull the whole-number members out of a JSON array, sorted and without
/// duplicates.  Anything else in the array is dropped.
fn sorted_members(members: &[Value]) -> Vec<i64> {
    let mut sorted: Vec<i64> = members
        .iter()
        .filter_map(|member| {
            let integer = whole_number(member);
            if integer.is_none() {
                warn!("Dropping non-integer range member {member}");
            }
            integer
        })
        .collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

/// Where a day sits within the range that matched it
#[derive(serde::Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RangePosition {
    pub is_start: bool,
    pub is_end: bool,
}

impl RangePosition {
    /// Locate `member` within `sorted` (which must contain it)
    fn within(member: i64, sorted: &[i64]) -> Self {
        RangePosition {
            is_start: sorted.first() == Some(&member),
            is_end: sorted.last() == Some(&member),
        }
    }

    /// Both ends at once: the range holds one day
    pub fn is_single_day(&self) -> bool {
        self.is_start && self.is_end
    }
}

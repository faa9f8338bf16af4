// SPDX-License-Identifier: MIT

//!
//! Inputs that may be given either as a list of dated entries or as a rule
//! (a function of the date)
//!

use crate::CalendarDate;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// Implementing types are tied to one calendar day
pub trait Dated {
    /// The day the entry applies to
    fn date(&self) -> CalendarDate;
}

impl Dated for CalendarDate {
    fn date(&self) -> CalendarDate {
        *self
    }
}

/// A rule producing an entry (or nothing) for a date
pub type DateRule<T> = Arc<dyn Fn(CalendarDate) -> Option<T> + Send + Sync>;

/// Either a collection of dated entries or a rule
#[derive(Clone)]
pub enum DateLookup<T> {
    Collection(Vec<T>),
    Rule(DateRule<T>),
}

impl<T> DateLookup<T> {
    /// Wrap a closure as a rule
    pub fn rule<F>(rule: F) -> Self
    where
        F: Fn(CalendarDate) -> Option<T> + Send + Sync + 'static,
    {
        DateLookup::Rule(Arc::new(rule))
    }
}

impl<T: Dated + Clone> DateLookup<T> {
    /// Find the entry for `date`.  For a collection the first same-day entry
    /// wins; a rule is called exactly once.
    pub fn find(&self, date: CalendarDate) -> Option<T> {
        match self {
            DateLookup::Collection(entries) => entries
                .iter()
                .find(|entry| entry.date().is_same_day(&date))
                .cloned(),
            DateLookup::Rule(rule) => rule(date),
        }
    }
}

impl<T> Default for DateLookup<T> {
    fn default() -> Self {
        DateLookup::Collection(Vec::new())
    }
}

impl<T: fmt::Debug> fmt::Debug for DateLookup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLookup::Collection(entries) => f.debug_tuple("Collection").field(entries).finish(),
            DateLookup::Rule(_) => f.write_str("Rule(..)"),
        }
    }
}

// Rules can't come from JSON, so only the collection form is deserialised
impl<'de, T: Deserialize<'de>> Deserialize<'de> for DateLookup<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(DateLookup::Collection)
    }
}

/// Dates on which a day can't be picked
pub type DisabledDates = DateLookup<CalendarDate>;

impl DisabledDates {
    /// Disable every date for which `predicate` returns true
    pub fn from_predicate<F>(predicate: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + Send + Sync + 'static,
    {
        DateLookup::rule(move |date| predicate(date).then_some(date))
    }

    /// Whether `date` is disabled
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.find(date).is_some()
    }
}

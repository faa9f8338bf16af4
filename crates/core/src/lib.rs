// SPDX-License-Identifier: MIT

//!
//! *Part of the wider calendar-picker project*
//!
//! This crate decides how a single day cell of a calendar picker should look
//! and behave: whether it can be picked, which of the overlapping highlight
//! systems (today, single selection, range selection, custom styles, coloured
//! ranges, month ranges) wins, and how the selection background is rounded.
//!
//! Rendering, touch handling and the layout of the month grid belong to the
//! caller.  Everything here is a pure function of its inputs, "today"
//! included, so days can be resolved in any order and on any thread.
//!

mod config;
mod constraints;
mod date;
mod lookup;
mod ranges;
mod resolver;
mod selection;
mod style;
mod verdict;

pub use config::*;
pub use constraints::*;
pub use date::*;
pub use lookup::*;
pub use ranges::*;
pub use resolver::*;
pub use selection::*;
pub use style::*;
pub use verdict::*;

// SPDX-License-Identifier: MIT

//!
//! The render-wide picker configuration
//!

use crate::{CalendarDate, ColouredRanges, Constraints, CustomDatesStyles, MonthRanges, SelectionState};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading a [`PickerConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything, apart from the day itself and today's date, that decides how a
/// day cell looks.  Supplied afresh for every render.
///
/// Keys follow the picker component's props (`coloredRanges`,
/// `multipleRanges`, ...) so existing configurations can be loaded as is.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerConfig {
    /// What has been selected so far
    pub selection: SelectionState,

    /// Which days can't be picked
    pub constraints: Constraints,

    /// Per-date style overrides
    pub custom_dates_styles: Option<CustomDatesStyles>,

    /// Turns the coloured ranges on
    pub allow_multiple_ranges: bool,

    /// Ranges of day numbers counted from `schedule_start_date`
    #[serde(rename = "coloredRanges")]
    pub coloured_ranges: ColouredRanges,

    /// Day 1 of the coloured ranges
    pub schedule_start_date: Option<CalendarDate>,

    /// Ranges of days of the month
    pub multiple_ranges: MonthRanges,

    /// Whether tapping a day selects it
    pub enable_date_change: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            selection: SelectionState::default(),
            constraints: Constraints::default(),
            custom_dates_styles: None,
            allow_multiple_ranges: false,
            coloured_ranges: ColouredRanges::new(),
            schedule_start_date: None,
            multiple_ranges: MonthRanges::new(),
            enable_date_change: true,
        }
    }
}

impl PickerConfig {
    /// Parse a config from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: PickerConfig = serde_json::from_str(json)?;
        debug!("Config parsed = {config:?}");
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path)?;
        let config = PickerConfig::from_json_str(&data)?;
        info!("Config loaded");
        Ok(config)
    }
}

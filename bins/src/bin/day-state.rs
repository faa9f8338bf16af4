// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider calendar-picker project*
//!
//! Resolve every day of a month against a picker config and print the
//! verdicts as JSON
//!

use calendar_picker_core::{
    CalendarDate, DayCell, DayOfWeek, DayStateResolver, DayVerdict, PickerConfig,
};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::PathBuf;

#[macro_use]
extern crate log;
extern crate simplelog;

/// Entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // Setup logging (to stderr, so stdout stays valid JSON)
    let config_log = ConfigBuilder::new()
        .add_filter_allow_str("calendar_picker")
        .build();
    let level = if args.verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])?;

    // Load the config
    let config = match PickerConfig::load(&args.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    // Today is read once for the whole month
    let today = match &args.today {
        Some(today) => CalendarDate::parse_iso(today)?,
        None => CalendarDate::today(),
    };

    let cells = month_cells(args.year, args.month, args.week_start)?;
    info!("Resolving {} days (today is {today})", cells.len());

    let resolver = DayStateResolver::new(&config, today);
    let verdicts = resolver.resolve_all(&cells);
    let output: Vec<CellOutput> = cells
        .iter()
        .zip(verdicts.iter())
        .map(|(cell, verdict)| CellOutput {
            date: cell.date,
            day_of_week: cell.day_of_week.map(|column| column.value()),
            verdict,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Lay out the days of the month, giving each its column in the week
fn month_cells(
    year: i32,
    month: u32,
    week_start: WeekStart,
) -> Result<Vec<DayCell>, Box<dyn std::error::Error>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| format!("{year}-{month:02} is not a valid month"))?;

    let mut cells = Vec::new();
    for date in first.iter_days().take_while(|date| date.month() == month) {
        let column = week_start.column(date.weekday());
        cells.push(DayCell::new(
            CalendarDate::try_from(date)?,
            Some(DayOfWeek::try_from(column)?),
        ));
    }
    Ok(cells)
}

/// One entry of the output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CellOutput<'a> {
    date: CalendarDate,
    day_of_week: Option<u8>,
    verdict: &'a DayVerdict,
}

/// The weekday shown in the first column
#[derive(Debug, Clone, Copy, ValueEnum)]
enum WeekStart {
    Sunday,
    Monday,
}

impl WeekStart {
    fn column(&self, weekday: Weekday) -> i64 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday().into(),
            WeekStart::Monday => weekday.num_days_from_monday().into(),
        }
    }
}

/// calendar-picker CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Resolve the state of every day cell in a month",
    after_help = "The config is JSON keyed by the picker's prop names \
                  (selection, constraints, coloredRanges, multipleRanges, ...)"
)]
struct Cli {
    /// Path to the JSON config
    #[arg(long)]
    config: PathBuf,

    /// Year to resolve
    #[arg(long)]
    year: i32,

    /// Month to resolve (1 to 12)
    #[arg(long)]
    month: u32,

    /// Date to treat as today (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    today: Option<String>,

    /// Which weekday the grid starts on
    #[arg(long, value_enum, default_value_t = WeekStart::Sunday)]
    week_start: WeekStart,

    /// Log every stage decision
    #[arg(long)]
    verbose: bool,
}

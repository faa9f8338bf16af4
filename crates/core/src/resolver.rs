// SPDX-License-Identifier: MIT

//!
//! Resolve the state of a single day cell
//!
//! The resolver first asks the constraints whether the day can be picked.  A
//! day that can't, and that isn't part of the current selection, ends there
//! with the disabled look.  Every other day goes through [`STAGES`] in order;
//! each stage may replace the style decided by the stages before it, so the
//! order of that array is the precedence between the highlight systems.
//!

use crate::{
    CalendarDate, Colour, Colours, CustomStyleMatch, DEFAULT_RANGE_TEXT, DayOfWeek, DayVerdict,
    HighlightSource, PickerConfig, Shape, StyleLayer, StyleStack, TODAY_ACCENT, ThemeStyle,
    day_number, evaluate, find_coloured_range, find_custom_style, find_month_range,
};
use log::trace;

/// One cell of the calendar grid, as laid out by the caller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DayCell {
    pub date: CalendarDate,

    /// The column the day sits in.  Month ranges are only drawn when known.
    pub day_of_week: Option<DayOfWeek>,
}

impl DayCell {
    pub fn new(date: CalendarDate, day_of_week: Option<DayOfWeek>) -> Self {
        DayCell { date, day_of_week }
    }
}

/// Facts about the day that every stage may consult
struct DayFacts<'a> {
    cell: &'a DayCell,
    config: &'a PickerConfig,
    is_today: bool,
    is_start: bool,
    is_end: bool,
    is_in_range: bool,
    custom: &'a CustomStyleMatch,
}

/// The style decision as it passes from stage to stage
struct Resolution {
    container: StyleStack,
    text: StyleStack,
    /// Drawn on top of `container` (single selection background)
    selected_background: StyleStack,
    override_disabled_text: bool,
    shape: Shape,
    highlight: HighlightSource,
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution {
            container: StyleStack::from_iter([ThemeStyle::DayButton]),
            text: StyleStack::new(),
            selected_background: StyleStack::new(),
            override_disabled_text: false,
            shape: Shape::NoRound,
            highlight: HighlightSource::None,
        }
    }
}

impl Resolution {
    /// Replace the container and text styles with a new highlight
    fn replace<C, T>(
        mut self,
        highlight: HighlightSource,
        shape: Shape,
        container: C,
        text: T,
    ) -> Self
    where
        C: IntoIterator,
        C::Item: Into<StyleLayer>,
        T: IntoIterator,
        T::Item: Into<StyleLayer>,
    {
        self.highlight = highlight;
        self.shape = shape;
        self.container = StyleStack::from_iter(container);
        self.text = StyleStack::from_iter(text);
        self
    }
}

type Stage = fn(&DayFacts, Resolution) -> Resolution;

/// The stages, lowest precedence first
const STAGES: [(&str, Stage); 7] = [
    ("today", today),
    ("custom style", custom_style),
    ("single selection", single_selection),
    ("confirmed range", confirmed_range),
    ("pending range", pending_range),
    ("coloured ranges", coloured_ranges),
    ("month ranges", month_ranges),
];

fn today(facts: &DayFacts, resolution: Resolution) -> Resolution {
    if !facts.is_today {
        return resolution;
    }
    resolution.replace(
        HighlightSource::Today,
        Shape::Circle,
        [ThemeStyle::SelectedToday],
        [ThemeStyle::TodayText],
    )
}

fn custom_style(facts: &DayFacts, mut resolution: Resolution) -> Resolution {
    if !facts.custom.has_style() {
        return resolution;
    }
    if facts.is_today {
        // Custom background over today's circle, today's text kept
        resolution.container = StyleStack::from_iter([ThemeStyle::SelectedToday]);
        resolution.container.extend(&facts.custom.style);
    }
    resolution.highlight = HighlightSource::Custom;
    resolution
}

fn single_selection(facts: &DayFacts, mut resolution: Resolution) -> Resolution {
    let selection = &facts.config.selection;
    if selection.allow_range_selection || !facts.is_start {
        return resolution;
    }
    let mut text = vec![ThemeStyle::SelectedDayLabel];
    if facts.is_today {
        text.push(ThemeStyle::TodayText);
    }
    text.push(ThemeStyle::SelectedDayText);

    resolution.selected_background = StyleStack::from_iter([ThemeStyle::SelectedDayBackground]);
    resolution.replace(
        HighlightSource::SingleSelect,
        Shape::Circle,
        [ThemeStyle::SelectedDay],
        text,
    )
}

fn confirmed_range(facts: &DayFacts, resolution: Resolution) -> Resolution {
    let selection = &facts.config.selection;
    if !selection.allow_range_selection || selection.confirmed_range().is_none() {
        return resolution;
    }
    use ThemeStyle::*;
    match (facts.is_start, facts.is_end) {
        (true, true) => resolution.replace(
            HighlightSource::RangeSelect,
            Shape::Circle,
            [SelectedDay, SelectedDayBackground, SelectedRange],
            [SelectedDayLabel, SelectedDayText, SelectedRangeStartText],
        ),
        (true, false) => resolution.replace(
            HighlightSource::RangeSelect,
            Shape::RoundLeft,
            [StartDayWrapper, SelectedRange, SelectedRangeStart],
            [SelectedDayLabel, SelectedDayText, SelectedRangeStartText],
        ),
        (false, true) => resolution.replace(
            HighlightSource::RangeSelect,
            Shape::RoundRight,
            [EndDayWrapper, SelectedRange, SelectedRangeEnd],
            [SelectedDayLabel, SelectedDayText, SelectedRangeEndText],
        ),
        (false, false) if facts.is_in_range => resolution.replace(
            HighlightSource::RangeSelect,
            Shape::Square,
            [InRangeDay, SelectedRange],
            [SelectedDayLabel, SelectedDayText],
        ),
        (false, false) => resolution,
    }
}

fn pending_range(facts: &DayFacts, resolution: Resolution) -> Resolution {
    if facts.config.selection.pending_start().is_none() || !facts.is_start {
        return resolution;
    }
    use ThemeStyle::*;
    let mut resolution = resolution.replace(
        HighlightSource::RangeSelect,
        Shape::RoundLeft,
        [StartDayWrapper, SelectedRange, SelectedRangeStart],
        [SelectedDayLabel, SelectedDayText, SelectedRangeStartText],
    );
    // The start is "too short" by itself under a minimum duration, yet must
    // still read as selected
    resolution.override_disabled_text = true;
    resolution
}

fn coloured_ranges(facts: &DayFacts, mut resolution: Resolution) -> Resolution {
    let config = facts.config;
    if !config.allow_multiple_ranges || config.coloured_ranges.is_empty() {
        return resolution;
    }
    let Some(schedule_start) = config.schedule_start_date else {
        return resolution;
    };
    let day_number = day_number(facts.cell.date, schedule_start);
    let Some(found) = find_coloured_range(day_number, &config.coloured_ranges) else {
        return resolution;
    };

    resolution.selected_background = StyleStack::new();
    let text_layer = |colour: Colour| -> [StyleLayer; 2] {
        [ThemeStyle::SelectedDayLabel.into(), Colours::text(colour).into()]
    };

    if facts.is_today {
        return resolution.replace(
            HighlightSource::Today,
            Shape::Circle,
            [
                StyleLayer::Theme(ThemeStyle::SelectedDay),
                StyleLayer::from(Colours::background(Colour::constant(TODAY_ACCENT))),
            ],
            text_layer(Colour::constant(DEFAULT_RANGE_TEXT)),
        );
    }

    let (wrapper, shape) = if found.position.is_single_day() {
        (ThemeStyle::SelectedDay, Shape::Circle)
    } else if found.position.is_start {
        (ThemeStyle::StartDayWrapper, Shape::RoundLeft)
    } else if found.position.is_end {
        (ThemeStyle::EndDayWrapper, Shape::RoundRight)
    } else {
        (ThemeStyle::InRangeDay, Shape::Square)
    };
    resolution.replace(
        HighlightSource::ColouredRange,
        shape,
        [StyleLayer::Theme(wrapper), StyleLayer::from(Colours::background(found.colour))],
        text_layer(found.text_colour),
    )
}

fn month_ranges(facts: &DayFacts, mut resolution: Resolution) -> Resolution {
    let config = facts.config;
    if config.multiple_ranges.is_empty() {
        return resolution;
    }
    let Some(day_of_week) = facts.cell.day_of_week else {
        return resolution;
    };
    let Some(found) = find_month_range(facts.cell.date.day(), &config.multiple_ranges) else {
        return resolution;
    };

    resolution.selected_background = StyleStack::new();
    let text = [
        StyleLayer::Theme(ThemeStyle::SelectedDayLabel),
        StyleLayer::from(Colours::text(found.style.text())),
    ];
    let background = Colours::background(found.style.background());

    if found.is_single_day() {
        return resolution.replace(
            HighlightSource::MonthRange,
            Shape::Circle,
            [StyleLayer::Theme(ThemeStyle::SelectedDay), StyleLayer::from(background)],
            text,
        );
    }

    // A band that wraps onto the next row is rounded at the row edges
    let round_left = found.position.is_start || day_of_week.is_first_of_week();
    let round_right = found.position.is_end || day_of_week.is_last_of_week();
    resolution.replace(
        HighlightSource::MonthRange,
        Shape::from_edges(round_left, round_right),
        [StyleLayer::Theme(ThemeStyle::InRangeDay), StyleLayer::from(background)],
        text,
    )
}

/// Resolves day cells against one configuration and one idea of "today".
/// Holds no state of its own; make a new one when either input changes.
#[derive(Clone, Copy, Debug)]
pub struct DayStateResolver<'a> {
    config: &'a PickerConfig,
    today: CalendarDate,
}

impl<'a> DayStateResolver<'a> {
    pub fn new(config: &'a PickerConfig, today: CalendarDate) -> Self {
        DayStateResolver { config, today }
    }

    /// The date treated as today
    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Resolve every cell, in order
    pub fn resolve_all(&self, cells: &[DayCell]) -> Vec<DayVerdict> {
        cells.iter().map(|cell| self.resolve(cell)).collect()
    }

    /// Resolve one day cell
    pub fn resolve(&self, cell: &DayCell) -> DayVerdict {
        let date = cell.date;
        let selection = &self.config.selection;

        let constraints = evaluate(date, &self.config.constraints, selection);
        let is_out_of_range = constraints.is_out_of_range();
        let is_start = selection.is_start(date);
        let is_end = selection.is_end(date);
        let is_in_range = selection.is_in_range(date);
        let custom = find_custom_style(date, self.config.custom_dates_styles.as_ref());

        let mut verdict = DayVerdict {
            date,
            constraints,
            is_out_of_range,
            is_today: date.is_same_day(&self.today),
            is_selected_start: is_start,
            is_selected_end: is_end,
            is_in_range,
            highlight_source: HighlightSource::None,
            shape: Shape::NoRound,
            applied_colours: Colours::default(),
            override_disabled_text_style: false,
            interactive: false,
            wrapper: StyleStack::from_iter([ThemeStyle::DayWrapper]),
            container: StyleStack::new(),
            text: StyleStack::new(),
        };

        if is_out_of_range && !(is_start || is_end || is_in_range) {
            trace!("{date}: can't be picked ({constraints:?})");
            disabled(&mut verdict, custom.for_disabled_day());
            return verdict;
        }

        let facts = DayFacts {
            cell,
            config: self.config,
            is_today: verdict.is_today,
            is_start,
            is_end,
            is_in_range,
            custom: &custom,
        };

        let resolution = STAGES
            .iter()
            .fold(Resolution::default(), |resolution, (name, stage)| {
                let before = (resolution.highlight, resolution.shape);
                let resolution = stage(&facts, resolution);
                if before != (resolution.highlight, resolution.shape) {
                    trace!(
                        "{date}: {name} stage -> {:?} {:?}",
                        resolution.highlight, resolution.shape
                    );
                }
                resolution
            });

        selectable(&mut verdict, &custom, resolution, self.config.enable_date_change);
        verdict
    }
}

/// The terminal look of a day that can't be picked
fn disabled(verdict: &mut DayVerdict, custom: CustomStyleMatch) {
    use ThemeStyle::*;
    verdict.wrapper.extend(&custom.container);

    verdict.container = StyleStack::from_iter([DayButton]);
    verdict.container.extend(&custom.style);

    verdict.text = StyleStack::from_iter([Text, DisabledText, DisabledDatesText]);
    verdict.text.extend(&custom.text);

    if custom.has_style() {
        verdict.highlight_source = HighlightSource::Custom;
    }
    verdict.applied_colours = applied_colours(&verdict.container, &verdict.text);
}

/// Assemble the stacks of a day that takes part in the stages
fn selectable(
    verdict: &mut DayVerdict,
    custom: &CustomStyleMatch,
    resolution: Resolution,
    enable_date_change: bool,
) {
    use ThemeStyle::*;
    verdict.wrapper.extend(&custom.container);

    // The custom style sits beneath whatever the stages chose
    verdict.container = custom.style.clone();
    verdict.container.extend(&resolution.container);
    verdict.container.extend(&resolution.selected_background);

    if verdict.is_out_of_range {
        // Part of the selection but not pickable (e.g. a pending start below
        // the minimum duration)
        verdict.text = StyleStack::from_iter([
            DayLabel,
            Text,
            DisabledText,
            DisabledDatesText,
            SelectedDisabledText,
            SelectedDisabledDatesText,
        ]);
        if resolution.override_disabled_text {
            verdict.text.push(SelectedRangeStartText);
        }
        verdict.override_disabled_text_style = resolution.override_disabled_text;
        verdict.interactive = false;
    } else {
        verdict.text = StyleStack::from_iter([DayLabel, Text]);
        verdict.text.extend(&custom.text);
        verdict.text.extend(&resolution.text);
        verdict.interactive = enable_date_change;
    }

    verdict.highlight_source = resolution.highlight;
    verdict.shape = resolution.shape;
    verdict.applied_colours = applied_colours(&verdict.container, &verdict.text);
}

/// Background from the container stack, text colour from the text stack
fn applied_colours(container: &StyleStack, text: &StyleStack) -> Colours {
    Colours {
        background: container.colours().background,
        text: text.colours().text,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        ColouredRange, ColouredRanges, Constraints, CustomDateStyle, CustomDatesStyles,
        DisabledDates, MonthRangeEntry, MonthRanges, RangeDuration, RangeStyle, SelectionState,
    };
    use calendar_picker_macros::{calendar_date, day_of_week};

    fn colour(colour: &str) -> Colour {
        Colour::from(colour).unwrap()
    }

    /// A "today" well away from the days under test
    fn elsewhere() -> CalendarDate {
        calendar_date!(2030, 6, 15)
    }

    fn resolve(config: &PickerConfig, date: CalendarDate) -> DayVerdict {
        DayStateResolver::new(config, elsewhere()).resolve(&DayCell::new(date, None))
    }

    fn red_one_to_three() -> PickerConfig {
        PickerConfig {
            allow_multiple_ranges: true,
            schedule_start_date: Some(calendar_date!(2024, 1, 1)),
            coloured_ranges: ColouredRanges::from_iter([ColouredRange::from(
                colour("red"),
                vec![vec![1, 2, 3]],
                None,
            )]),
            ..Default::default()
        }
    }

    fn fives_to_sevens() -> PickerConfig {
        PickerConfig {
            multiple_ranges: MonthRanges::from_iter([MonthRangeEntry::from(
                vec![5, 6, 7],
                RangeStyle {
                    background_color: Some(colour("#fff")),
                    ..Default::default()
                },
            )]),
            ..Default::default()
        }
    }

    #[test]
    fn plain_day() {
        let verdict = resolve(&PickerConfig::default(), calendar_date!(2024, 3, 10));
        assert!(!verdict.is_out_of_range);
        assert!(verdict.interactive);
        assert_eq!(verdict.highlight_source, HighlightSource::None);
        assert_eq!(verdict.shape, Shape::NoRound);
        assert!(verdict.container.contains(ThemeStyle::DayButton));
        assert_eq!(
            verdict.press_target().map(|press| (press.month, press.day)),
            Some((3, 10))
        );
    }

    #[test]
    fn deterministic() {
        let mut config = red_one_to_three();
        config.selection = SelectionState::range(calendar_date!(2024, 1, 2), None);
        config.constraints.min_range_duration = Some(RangeDuration::Uniform(1));
        let resolver = DayStateResolver::new(&config, calendar_date!(2024, 1, 3));

        for day in 1..=5 {
            let cell = DayCell::new(
                CalendarDate::from_ymd(2024, 1, day).unwrap(),
                Some(day_of_week!(2)),
            );
            assert_eq!(resolver.resolve(&cell), resolver.resolve(&cell));
        }
    }

    #[test]
    fn disabled_date_is_terminal() {
        let config = PickerConfig {
            constraints: Constraints {
                disabled_dates: Some(DisabledDates::Collection(vec![calendar_date!(2024, 3, 10)])),
                ..Default::default()
            },
            ..fives_to_sevens()
        };

        let verdict = resolve(&config, calendar_date!(2024, 3, 10));
        assert!(verdict.constraints.is_disabled);
        assert!(!verdict.interactive);
        assert!(verdict.press_target().is_none());
        assert_eq!(verdict.highlight_source, HighlightSource::None);
        assert!(verdict.text.contains(ThemeStyle::DisabledText));

        // One day either side
        assert!(!resolve(&config, calendar_date!(2024, 3, 9)).is_out_of_range);
        assert!(!resolve(&config, calendar_date!(2024, 3, 11)).is_out_of_range);
    }

    #[test]
    fn disabled_day_custom_style_needs_allow_disabled() {
        let day = calendar_date!(2024, 3, 10);
        let mut custom = CustomDateStyle {
            style: Some(Colours::background(colour("red"))),
            container_style: Some(Colours::background(colour("grey"))),
            ..CustomDateStyle::new(day)
        };
        let mut config = PickerConfig {
            constraints: Constraints {
                max_date: Some(calendar_date!(2024, 3, 1)),
                ..Default::default()
            },
            custom_dates_styles: Some(CustomDatesStyles::Collection(vec![custom.clone()])),
            ..Default::default()
        };

        let verdict = resolve(&config, day);
        assert!(verdict.constraints.is_after_max);
        assert_eq!(verdict.applied_colours, Colours::default());
        assert_eq!(verdict.wrapper, StyleStack::from_iter([ThemeStyle::DayWrapper]));

        custom.allow_disabled = true;
        config.custom_dates_styles = Some(CustomDatesStyles::Collection(vec![custom]));
        let verdict = resolve(&config, day);
        assert_eq!(verdict.applied_colours.background, Some(colour("red")));
        assert_eq!(verdict.highlight_source, HighlightSource::Custom);
        assert_eq!(verdict.wrapper.colours().background, Some(colour("grey")));
        assert!(!verdict.interactive);
    }

    #[test]
    fn today_is_circled() {
        let day = calendar_date!(2024, 3, 10);
        let config = PickerConfig::default();
        let verdict = DayStateResolver::new(&config, day).resolve(&DayCell::new(day, None));
        assert!(verdict.is_today);
        assert_eq!(verdict.highlight_source, HighlightSource::Today);
        assert_eq!(verdict.shape, Shape::Circle);
        assert!(verdict.container.contains(ThemeStyle::SelectedToday));
        assert!(verdict.text.contains(ThemeStyle::TodayText));
    }

    #[test]
    fn custom_style_over_today_keeps_today_text() {
        let day = calendar_date!(2024, 3, 10);
        let config = PickerConfig {
            custom_dates_styles: Some(CustomDatesStyles::Collection(vec![CustomDateStyle {
                style: Some(Colours::background(colour("red"))),
                text_style: Some(Colours::text(colour("black"))),
                ..CustomDateStyle::new(day)
            }])),
            ..Default::default()
        };
        let verdict = DayStateResolver::new(&config, day).resolve(&DayCell::new(day, None));
        assert_eq!(verdict.highlight_source, HighlightSource::Custom);
        assert_eq!(verdict.shape, Shape::Circle);
        assert!(verdict.container.contains(ThemeStyle::SelectedToday));
        assert_eq!(verdict.applied_colours.background, Some(colour("red")));

        // Custom text sits beneath today's text in the stack
        let layers = verdict.text.layers();
        let custom_text = layers
            .iter()
            .position(|layer| *layer == StyleLayer::from(Colours::text(colour("black"))))
            .unwrap();
        let today_text = layers
            .iter()
            .position(|layer| *layer == StyleLayer::Theme(ThemeStyle::TodayText))
            .unwrap();
        assert!(custom_text < today_text);
    }

    #[test]
    fn single_selection_style() {
        let day = calendar_date!(2024, 3, 10);
        let config = PickerConfig {
            selection: SelectionState::single(day),
            ..Default::default()
        };
        let verdict = resolve(&config, day);
        assert!(verdict.is_selected_start);
        assert_eq!(verdict.highlight_source, HighlightSource::SingleSelect);
        assert_eq!(verdict.shape, Shape::Circle);
        assert!(verdict.container.contains(ThemeStyle::SelectedDay));
        assert!(verdict.container.contains(ThemeStyle::SelectedDayBackground));
        assert!(verdict.text.contains(ThemeStyle::SelectedDayText));

        let other = resolve(&config, calendar_date!(2024, 3, 11));
        assert_eq!(other.highlight_source, HighlightSource::None);
    }

    #[test]
    fn confirmed_range_shapes() {
        let config = PickerConfig {
            selection: SelectionState::range(
                calendar_date!(2024, 3, 10),
                Some(calendar_date!(2024, 3, 13)),
            ),
            ..Default::default()
        };

        let start = resolve(&config, calendar_date!(2024, 3, 10));
        assert_eq!(start.highlight_source, HighlightSource::RangeSelect);
        assert_eq!(start.shape, Shape::RoundLeft);
        assert!(start.text.contains(ThemeStyle::SelectedRangeStartText));

        let inside = resolve(&config, calendar_date!(2024, 3, 11));
        assert!(inside.is_in_range);
        assert_eq!(inside.shape, Shape::Square);
        assert!(inside.container.contains(ThemeStyle::InRangeDay));

        let end = resolve(&config, calendar_date!(2024, 3, 13));
        assert_eq!(end.shape, Shape::RoundRight);
        assert!(end.text.contains(ThemeStyle::SelectedRangeEndText));

        let outside = resolve(&config, calendar_date!(2024, 3, 14));
        assert_eq!(outside.highlight_source, HighlightSource::None);
        assert_eq!(outside.shape, Shape::NoRound);
    }

    #[test]
    fn zero_length_range() {
        let day = calendar_date!(2024, 3, 10);
        let config = PickerConfig {
            selection: SelectionState::range(day, Some(day)),
            ..Default::default()
        };
        let verdict = resolve(&config, day);
        assert_eq!(verdict.shape, Shape::Circle);
        assert!(verdict.container.contains(ThemeStyle::SelectedDay));
        assert!(verdict.text.contains(ThemeStyle::SelectedRangeStartText));
    }

    #[test]
    fn selected_days_survive_constraints() {
        // Range ends that fall after max date are still drawn as selected
        let config = PickerConfig {
            selection: SelectionState::range(
                calendar_date!(2024, 3, 10),
                Some(calendar_date!(2024, 3, 13)),
            ),
            constraints: Constraints {
                max_date: Some(calendar_date!(2024, 3, 11)),
                ..Default::default()
            },
            ..Default::default()
        };

        let inside = resolve(&config, calendar_date!(2024, 3, 12));
        assert!(inside.is_out_of_range);
        assert!(!inside.interactive);
        assert_eq!(inside.shape, Shape::Square);
        assert!(inside.text.contains(ThemeStyle::SelectedDisabledText));

        let end = resolve(&config, calendar_date!(2024, 3, 13));
        assert_eq!(end.shape, Shape::RoundRight);
        assert!(!end.override_disabled_text_style);
    }

    #[test]
    fn pending_start_below_minimum_duration() {
        let config = PickerConfig {
            selection: SelectionState::range(calendar_date!(2024, 3, 10), None),
            constraints: Constraints {
                min_range_duration: Some(RangeDuration::Uniform(1)),
                ..Default::default()
            },
            ..Default::default()
        };

        // Too short, yet styled as the range start
        let start = resolve(&config, calendar_date!(2024, 3, 10));
        assert!(start.constraints.is_range_too_short);
        assert!(start.is_out_of_range);
        assert_eq!(start.highlight_source, HighlightSource::RangeSelect);
        assert_eq!(start.shape, Shape::RoundLeft);
        assert!(start.override_disabled_text_style);
        assert_eq!(
            start.text.layers().last(),
            Some(&StyleLayer::Theme(ThemeStyle::SelectedRangeStartText))
        );

        // Too short and plainly disabled
        let before = resolve(&config, calendar_date!(2024, 3, 9));
        assert!(before.constraints.is_range_too_short);
        assert_eq!(before.highlight_source, HighlightSource::None);
        assert_eq!(before.shape, Shape::NoRound);
        assert!(!before.override_disabled_text_style);
        assert!(!before.text.contains(ThemeStyle::SelectedRangeStartText));

        let after = resolve(&config, calendar_date!(2024, 3, 11));
        assert!(after.interactive);
    }

    #[test]
    fn coloured_range_boundaries() {
        let config = red_one_to_three();

        let start = resolve(&config, calendar_date!(2024, 1, 1));
        assert_eq!(start.highlight_source, HighlightSource::ColouredRange);
        assert_eq!(start.shape, Shape::RoundLeft);
        assert_eq!(start.applied_colours.background, Some(colour("red")));
        assert_eq!(start.applied_colours.text, Some(colour(DEFAULT_RANGE_TEXT)));

        let middle = resolve(&config, calendar_date!(2024, 1, 2));
        assert_eq!(middle.shape, Shape::Square);

        let end = resolve(&config, calendar_date!(2024, 1, 3));
        assert_eq!(end.shape, Shape::RoundRight);

        let outside = resolve(&config, calendar_date!(2024, 1, 4));
        assert_eq!(outside.highlight_source, HighlightSource::None);
    }

    #[test]
    fn coloured_ranges_need_switch_and_anchor() {
        let mut config = red_one_to_three();
        config.allow_multiple_ranges = false;
        assert_eq!(
            resolve(&config, calendar_date!(2024, 1, 1)).highlight_source,
            HighlightSource::None
        );

        let mut config = red_one_to_three();
        config.schedule_start_date = None;
        assert_eq!(
            resolve(&config, calendar_date!(2024, 1, 1)).highlight_source,
            HighlightSource::None
        );
    }

    #[test]
    fn coloured_range_overrides_selection() {
        let mut config = red_one_to_three();
        config.selection = SelectionState::single(calendar_date!(2024, 1, 2));
        let verdict = resolve(&config, calendar_date!(2024, 1, 2));
        assert_eq!(verdict.highlight_source, HighlightSource::ColouredRange);
        assert_eq!(verdict.shape, Shape::Square);
        assert!(!verdict.container.contains(ThemeStyle::SelectedDayBackground));
        assert_eq!(verdict.applied_colours.background, Some(colour("red")));
    }

    #[test]
    fn today_short_circuits_coloured_range() {
        let config = red_one_to_three();
        let today = calendar_date!(2024, 1, 2);
        let verdict = DayStateResolver::new(&config, today).resolve(&DayCell::new(today, None));
        assert_eq!(verdict.highlight_source, HighlightSource::Today);
        assert_eq!(verdict.shape, Shape::Circle);
        assert_eq!(verdict.applied_colours.background, Some(colour(TODAY_ACCENT)));
        assert_ne!(verdict.applied_colours.background, Some(colour("red")));
    }

    #[test]
    fn single_day_ranges_are_circles() {
        let mut config = red_one_to_three();
        config.coloured_ranges = ColouredRanges::from_iter([ColouredRange::from(
            colour("red"),
            vec![vec![4]],
            None,
        )]);
        assert_eq!(resolve(&config, calendar_date!(2024, 1, 4)).shape, Shape::Circle);

        let config = PickerConfig {
            multiple_ranges: MonthRanges::from_iter([MonthRangeEntry::from(
                vec![20],
                RangeStyle::default(),
            )]),
            ..Default::default()
        };
        let resolver = DayStateResolver::new(&config, elsewhere());
        for column in [0, 3, 6] {
            let cell = DayCell::new(
                calendar_date!(2024, 3, 20),
                Some(DayOfWeek::try_from(column).unwrap()),
            );
            assert_eq!(resolver.resolve(&cell).shape, Shape::Circle);
        }
    }

    #[test]
    fn month_range_recurs_every_month() {
        let config = fives_to_sevens();
        let resolver = DayStateResolver::new(&config, elsewhere());
        for (year, month) in [(2024, 1), (2024, 8), (1999, 8), (2031, 1)] {
            for day in 5..=7 {
                let date = CalendarDate::from_ymd(year, month, day).unwrap();
                let verdict = resolver.resolve(&DayCell::new(date, Some(day_of_week!(3))));
                assert_eq!(verdict.highlight_source, HighlightSource::MonthRange);
                assert_eq!(verdict.applied_colours.background, Some(colour("#fff")));
                assert_eq!(verdict.applied_colours.text, Some(colour(DEFAULT_RANGE_TEXT)));
            }
            let date = CalendarDate::from_ymd(year, month, 8).unwrap();
            let verdict = resolver.resolve(&DayCell::new(date, Some(day_of_week!(3))));
            assert_eq!(verdict.highlight_source, HighlightSource::None);
        }
    }

    #[test]
    fn month_range_empty_background_uses_default() {
        let config = PickerConfig::from_json_str(
            r#"{"multipleRanges": [{"range": [5, 6, 7], "style": {"backgroundColor": ""}}]}"#,
        )
        .unwrap();
        let resolver = DayStateResolver::new(&config, elsewhere());
        let verdict =
            resolver.resolve(&DayCell::new(calendar_date!(2024, 3, 6), Some(day_of_week!(3))));
        assert_eq!(verdict.highlight_source, HighlightSource::MonthRange);
        assert_eq!(
            verdict.applied_colours.background,
            Some(colour(crate::DEFAULT_MONTH_RANGE_BACKGROUND))
        );
    }

    #[test]
    fn month_range_needs_day_of_week() {
        let config = fives_to_sevens();
        let verdict = resolve(&config, calendar_date!(2024, 3, 6));
        assert_eq!(verdict.highlight_source, HighlightSource::None);
    }

    #[test]
    fn month_range_week_edges() {
        let config = fives_to_sevens();
        let resolver = DayStateResolver::new(&config, elsewhere());
        let middle = calendar_date!(2024, 3, 6);

        let first = resolver.resolve(&DayCell::new(middle, Some(day_of_week!(0))));
        assert_eq!(first.shape, Shape::RoundLeft);

        let last = resolver.resolve(&DayCell::new(middle, Some(day_of_week!(6))));
        assert_eq!(last.shape, Shape::RoundRight);

        for column in 1..=5 {
            let cell = DayCell::new(middle, Some(DayOfWeek::try_from(column).unwrap()));
            assert_eq!(resolver.resolve(&cell).shape, Shape::Square);
        }

        // Range start in the last column rounds both edges
        let start = resolver.resolve(&DayCell::new(calendar_date!(2024, 3, 5), Some(day_of_week!(6))));
        assert_eq!(start.shape, Shape::RoundBoth);

        let end = resolver.resolve(&DayCell::new(calendar_date!(2024, 3, 7), Some(day_of_week!(2))));
        assert_eq!(end.shape, Shape::RoundRight);
    }

    #[test]
    fn month_range_beats_coloured_range() {
        // Day number 6 and day of month 6 are both covered
        let mut config = PickerConfig {
            multiple_ranges: fives_to_sevens().multiple_ranges,
            ..red_one_to_three()
        };
        config.coloured_ranges = ColouredRanges::from_iter([ColouredRange::from(
            colour("red"),
            vec![vec![5, 6, 7]],
            None,
        )]);

        let resolver = DayStateResolver::new(&config, elsewhere());
        let verdict = resolver.resolve(&DayCell::new(calendar_date!(2024, 1, 6), Some(day_of_week!(0))));
        assert_eq!(verdict.highlight_source, HighlightSource::MonthRange);
        assert_eq!(verdict.shape, Shape::RoundLeft);
        assert_eq!(verdict.applied_colours.background, Some(colour("#fff")));

        // Without a column the month ranges are skipped
        let verdict = resolver.resolve(&DayCell::new(calendar_date!(2024, 1, 6), None));
        assert_eq!(verdict.highlight_source, HighlightSource::ColouredRange);
    }

    #[test]
    fn month_range_ignores_today() {
        let config = fives_to_sevens();
        let today = calendar_date!(2024, 3, 6);
        let verdict = DayStateResolver::new(&config, today)
            .resolve(&DayCell::new(today, Some(day_of_week!(3))));
        assert!(verdict.is_today);
        assert_eq!(verdict.highlight_source, HighlightSource::MonthRange);
    }

    #[test]
    fn date_change_disabled() {
        let config = PickerConfig {
            enable_date_change: false,
            ..Default::default()
        };
        let verdict = resolve(&config, calendar_date!(2024, 3, 10));
        assert!(!verdict.is_out_of_range);
        assert!(!verdict.interactive);
    }

    #[test]
    fn rule_based_inputs() {
        let config = PickerConfig {
            constraints: Constraints {
                disabled_dates: Some(DisabledDates::from_predicate(|date| {
                    date.day().value() % 2 == 0
                })),
                ..Default::default()
            },
            custom_dates_styles: Some(CustomDatesStyles::rule(|date| {
                Some(CustomDateStyle {
                    style: Some(Colours::background(Colour::from("gold").unwrap())),
                    ..CustomDateStyle::new(date)
                })
            })),
            ..Default::default()
        };

        let even = resolve(&config, calendar_date!(2024, 3, 10));
        assert!(even.constraints.is_disabled);
        assert_eq!(even.applied_colours.background, None);

        let odd = resolve(&config, calendar_date!(2024, 3, 11));
        assert_eq!(odd.highlight_source, HighlightSource::Custom);
        assert_eq!(odd.applied_colours.background, Some(colour("gold")));
    }

    #[test]
    fn resolve_all_keeps_order() {
        let config = fives_to_sevens();
        let resolver = DayStateResolver::new(&config, elsewhere());
        let cells: Vec<DayCell> = (4..=8)
            .map(|day| {
                DayCell::new(
                    CalendarDate::from_ymd(2024, 3, day).unwrap(),
                    Some(day_of_week!(3)),
                )
            })
            .collect();
        let sources: Vec<HighlightSource> = resolver
            .resolve_all(&cells)
            .iter()
            .map(|verdict| verdict.highlight_source)
            .collect();
        assert_eq!(
            sources,
            [
                HighlightSource::None,
                HighlightSource::MonthRange,
                HighlightSource::MonthRange,
                HighlightSource::MonthRange,
                HighlightSource::None,
            ]
        );
    }

    #[test]
    fn resolves_across_threads() {
        let config = PickerConfig {
            constraints: Constraints {
                disabled_dates: Some(DisabledDates::from_predicate(|date| date.day().value() == 13)),
                ..Default::default()
            },
            ..fives_to_sevens()
        };
        let resolver = DayStateResolver::new(&config, elsewhere());
        let cells: Vec<DayCell> = (1..=31)
            .map(|day| {
                let column = DayOfWeek::try_from(day % 7).unwrap();
                DayCell::new(CalendarDate::from_ymd(2024, 3, day).unwrap(), Some(column))
            })
            .collect();

        let sequential = resolver.resolve_all(&cells);
        let concurrent: Vec<DayVerdict> = std::thread::scope(|scope| {
            let handles: Vec<_> = cells
                .chunks(8)
                .map(|chunk| scope.spawn(move || resolver.resolve_all(chunk)))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(sequential, concurrent);
        assert!(concurrent[12].constraints.is_disabled);
    }
}

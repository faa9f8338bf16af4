// SPDX-License-Identifier: MIT

//!
//! Colours, theme slots, and the ordered style stacks handed to the presenter
//!

use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Accent used for today when it falls inside a coloured range
pub const TODAY_ACCENT: &str = "#007AFF";

/// Text colour used on top of range backgrounds when none is configured
pub const DEFAULT_RANGE_TEXT: &str = "#FFFFFF";

/// Background used for month ranges that don't configure one
pub const DEFAULT_MONTH_RANGE_BACKGROUND: &str = "#5ce600";

/// Errors that can arise in relation to a [`Colour`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColourError {
    #[error("Colour cannot be empty")]
    Empty,
}

/// A colour as understood by the presenter (a name such as `red` or a hex
/// value such as `#007AFF`).  Never empty.
#[derive(derive_more::Display, Serialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Colour(String);

impl Colour {
    /// Create a colour if it will be valid
    pub fn from<S: ToString>(colour: S) -> Result<Self, ColourError> {
        let colour = colour.to_string();
        let colour = colour.trim();
        if colour.is_empty() {
            Err(ColourError::Empty)
        } else {
            Ok(Colour(colour.to_string()))
        }
    }

    /// Get the underlying `&str`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The built in constants are never empty
    pub(crate) fn constant(colour: &'static str) -> Self {
        Colour(colour.to_string())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        Colour::from(string).map_err(serde::de::Error::custom)
    }
}

/// Read an optional colour, treating anything that isn't a usable colour
/// string (empty, a number, ...) as unset
pub(crate) fn lenient_colour<'de, D>(deserializer: D) -> Result<Option<Colour>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(colour) => match Colour::from(&colour) {
            Ok(colour) => Ok(Some(colour)),
            Err(error) => {
                warn!("Ignoring colour: {error}");
                Ok(None)
            }
        },
        other => {
            warn!("Ignoring colour {other}: not a string");
            Ok(None)
        }
    }
}

/// A partial style: only the properties that are set take part in a merge
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(from = "RawColours")]
pub struct Colours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Colour>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Colour>,
}

/// The keys a style object may use.  `backgroundColor` beats `background`;
/// for text, `color` beats `textColor`, which beats `text`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColours {
    #[serde(default, deserialize_with = "lenient_colour")]
    background: Option<Colour>,

    #[serde(default, deserialize_with = "lenient_colour")]
    background_color: Option<Colour>,

    #[serde(default, deserialize_with = "lenient_colour")]
    text: Option<Colour>,

    #[serde(default, deserialize_with = "lenient_colour")]
    color: Option<Colour>,

    #[serde(default, deserialize_with = "lenient_colour")]
    text_color: Option<Colour>,
}

impl From<RawColours> for Colours {
    fn from(value: RawColours) -> Self {
        Colours {
            background: value.background_color.or(value.background),
            text: value.color.or(value.text_color).or(value.text),
        }
    }
}

impl Colours {
    /// Only a background
    pub fn background(colour: Colour) -> Self {
        Colours {
            background: Some(colour),
            text: None,
        }
    }

    /// Only a text colour
    pub fn text(colour: Colour) -> Self {
        Colours {
            background: None,
            text: Some(colour),
        }
    }

    /// Whether no property is set
    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.text.is_none()
    }

    /// Layer `other` on top of `self`; whatever `other` sets wins
    pub fn merge(mut self, other: &Colours) -> Colours {
        if let Some(background) = &other.background {
            self.background = Some(background.clone());
        }
        if let Some(text) = &other.text {
            self.text = Some(text.clone());
        }
        self
    }
}

/// Style slots the presenter maps onto its theme
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ThemeStyle {
    DayWrapper,
    DayButton,
    DayLabel,
    Text,
    SelectedToday,
    TodayText,
    SelectedDay,
    SelectedDayBackground,
    SelectedDayLabel,
    SelectedDayText,
    StartDayWrapper,
    EndDayWrapper,
    InRangeDay,
    SelectedRange,
    SelectedRangeStart,
    SelectedRangeEnd,
    SelectedRangeStartText,
    SelectedRangeEndText,
    DisabledText,
    DisabledDatesText,
    SelectedDisabledText,
    SelectedDisabledDatesText,
}

/// One entry of a [`StyleStack`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum StyleLayer {
    Theme(ThemeStyle),
    Colours(Colours),
}

impl From<ThemeStyle> for StyleLayer {
    fn from(value: ThemeStyle) -> Self {
        StyleLayer::Theme(value)
    }
}

impl From<Colours> for StyleLayer {
    fn from(value: Colours) -> Self {
        StyleLayer::Colours(value)
    }
}

/// An ordered list of style layers.  The presenter applies them first to last,
/// so the last layer touching a property wins.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StyleStack(Vec<StyleLayer>);

impl StyleStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a layer on top
    pub fn push<L: Into<StyleLayer>>(&mut self, layer: L) {
        self.0.push(layer.into());
    }

    /// Push every layer of `other`, in order, on top
    pub fn extend(&mut self, other: &StyleStack) {
        self.0.extend(other.0.iter().cloned());
    }

    /// Push a colour patch only if it sets something
    pub fn push_colours(&mut self, colours: &Option<Colours>) {
        if let Some(colours) = colours.as_ref().filter(|c| !c.is_empty()) {
            self.0.push(StyleLayer::Colours(colours.clone()));
        }
    }

    /// Whether the stack includes the theme slot
    pub fn contains(&self, theme_style: ThemeStyle) -> bool {
        self.0.contains(&StyleLayer::Theme(theme_style))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the layers, bottom first
    pub fn layers(&self) -> &[StyleLayer] {
        &self.0
    }

    /// Merge every colour patch in the stack, bottom to top
    pub fn colours(&self) -> Colours {
        self.0
            .iter()
            .filter_map(|layer| match layer {
                StyleLayer::Colours(colours) => Some(colours),
                StyleLayer::Theme(_) => None,
            })
            .fold(Colours::default(), |merged, colours| merged.merge(colours))
    }
}

impl<L: Into<StyleLayer>> FromIterator<L> for StyleStack {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        StyleStack(iter.into_iter().map(Into::into).collect())
    }
}

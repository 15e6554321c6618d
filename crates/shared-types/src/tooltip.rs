//! Tooltip annotation contract: the attributes page markup carries and
//! the parsed form the overlay manager works with

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute names read from and written to annotated elements
pub mod attributes {
    /// Label shown in the overlay; absence suppresses the tooltip
    pub const TEXT: &str = "data-tooltip";
    /// Preferred side: top, bottom, left or right
    pub const POSITION: &str = "data-tooltip-position";
    /// Hover delay in milliseconds before the overlay appears
    pub const DELAY: &str = "data-tooltip-delay";
    /// Keyboard reachability
    pub const FOCUS_INDEX: &str = "tabindex";
    /// Present when `tabindex` was written by `annotate` rather than the page
    pub const MANAGED_FOCUS: &str = "data-tooltip-tabindex";
}

/// Side of the anchor point the overlay is placed on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TooltipPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            TooltipPosition::Top => "top",
            TooltipPosition::Bottom => "bottom",
            TooltipPosition::Left => "left",
            TooltipPosition::Right => "right",
        }
    }

    /// Lenient parse used for attribute values: unknown sides fall back to top
    pub fn parse_lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for TooltipPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TooltipPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(TooltipPosition::Top),
            "bottom" => Ok(TooltipPosition::Bottom),
            "left" => Ok(TooltipPosition::Left),
            "right" => Ok(TooltipPosition::Right),
            other => Err(format!("unknown tooltip position: {other}")),
        }
    }
}

/// Parsed tooltip annotation of one element, read fresh on every interaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    pub position: TooltipPosition,
    pub delay_ms: u32,
}

impl Annotation {
    /// Build an annotation from raw attribute values.
    ///
    /// Returns `None` when the text is missing or blank. A missing or
    /// malformed delay falls back to `default_delay_ms`.
    pub fn from_attributes(
        text: Option<&str>,
        position: Option<&str>,
        delay: Option<&str>,
        default_delay_ms: u32,
    ) -> Option<Self> {
        let text = text.map(str::trim).filter(|t| !t.is_empty())?;

        Some(Self {
            text: text.to_string(),
            position: TooltipPosition::parse_lenient(position),
            delay_ms: parse_delay(delay).unwrap_or(default_delay_ms),
        })
    }
}

fn parse_delay(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok()
}

//! Hotspot model: a point-of-interest marker anchored to a page element.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ModalContent;

/// Category of a hotspot. Only affects icon and colour.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    /// General explanation
    Info,

    /// Points at a metric or chart
    Data,

    /// Points at something the user can click
    Action,
}

impl HotspotKind {
    /// Convert to the catalog string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HotspotKind::Info => "info",
            HotspotKind::Data => "data",
            HotspotKind::Action => "action",
        }
    }

    /// Marker icon used by terminal surfaces.
    ///
    /// ```rust
    /// use walkthrough_core::models::HotspotKind;
    ///
    /// assert_eq!(HotspotKind::Info.icon(), "ⓘ");
    /// assert_eq!(HotspotKind::Data.icon(), "▣");
    /// assert_eq!(HotspotKind::Action.icon(), "➤");
    /// ```
    pub fn icon(&self) -> &'static str {
        match self {
            HotspotKind::Info => "ⓘ",
            HotspotKind::Data => "▣",
            HotspotKind::Action => "➤",
        }
    }
}

/// Side of the anchor a marker is placed on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(format!("Invalid side: {s}")),
        }
    }
}

/// A clickable marker tied to a step.
///
/// Visited status is tracked by the session, never on the hotspot itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hotspot {
    /// Identifier, unique within its step
    pub id: String,

    /// Category (icon/colour only)
    pub kind: HotspotKind,

    /// Selector of the element the marker is positioned relative to
    pub anchor: String,

    /// Short tooltip text
    pub tooltip: String,

    /// Horizontal pixel offset applied after default placement
    #[serde(default)]
    pub offset_x: f64,

    /// Vertical pixel offset applied after default placement
    #[serde(default)]
    pub offset_y: f64,

    /// Explicit placement side; auto-computed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,

    /// Content shown when the hotspot is activated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalContent>,
}

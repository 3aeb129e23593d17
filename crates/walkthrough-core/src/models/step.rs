//! Step model definition and related functionality.

use std::{str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::{route::route_matches, Hotspot, ModalContent};

/// How a step is presented by the host.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Informational modal (welcome and completion style steps)
    Modal,

    /// Whole page highlighted, hotspots scattered over it
    FullPage,

    /// A single element is spotlighted via the step's focus element
    ElementFocus,

    /// Waits for the user to click the trigger element and navigate
    Navigation,
}

impl StepKind {
    /// Convert to the catalog string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Modal => "modal",
            StepKind::FullPage => "full-page",
            StepKind::ElementFocus => "element-focus",
            StepKind::Navigation => "navigation",
        }
    }
}

impl FromStr for StepKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modal" => Ok(StepKind::Modal),
            "full-page" | "page" => Ok(StepKind::FullPage),
            "element-focus" | "element" => Ok(StepKind::ElementFocus),
            "navigation" => Ok(StepKind::Navigation),
            _ => Err(format!("Invalid step kind: {s}")),
        }
    }
}

/// One stage of the guided sequence.
///
/// Steps are defined once when the catalog is loaded and never change for
/// the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Sequential identifier, 1-based and contiguous within a catalog
    pub id: u32,

    /// Display name
    pub name: String,

    /// Phase label used for grouping (not unique)
    pub phase: String,

    /// Presentation kind
    pub kind: StepKind,

    /// Route the host must display while this step is active
    pub route: String,

    /// Auto-advance duration in seconds, 0 means manual advance only
    #[serde(default)]
    pub duration_secs: u32,

    /// Instruction banner text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<String>,

    /// Selector of the element to spotlight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_element: Option<String>,

    /// Selector of the element the user is expected to click
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_element: Option<String>,

    /// Points of interest shown on this step, in render order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hotspots: Vec<Hotspot>,

    /// Modal payload for modal-style steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalContent>,

    /// Additional route pattern the host may stay on for this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepts_route: Option<String>,

    /// Route pattern that moves the tour to the following step when reached
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advance_on_route: Option<String>,
}

impl Step {
    /// Whether the step only advances on explicit user action.
    pub fn is_manual(&self) -> bool {
        self.duration_secs == 0
    }

    /// Configured auto-advance duration.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Looks up a hotspot of this step by id.
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|hotspot| hotspot.id == id)
    }

    /// Whether the host showing `path` satisfies this step's route.
    pub fn accepts(&self, path: &str) -> bool {
        route_matches(&self.route, path)
            || self
                .accepts_route
                .as_deref()
                .is_some_and(|pattern| route_matches(pattern, path))
    }
}

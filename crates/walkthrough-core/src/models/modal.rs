//! Modal content payloads.

use serde::{Deserialize, Serialize};

/// Descriptive payload shown in an overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,

    pub description: String,

    /// Feature bullet list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,

    /// Completion summary counters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CompletionMetrics>,

    /// "What to do next" suggestions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,

    /// Outbound help route
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_link: Option<String>,
}

impl ModalContent {
    /// Creates a modal with only a title and description.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            features: Vec::new(),
            metrics: None,
            next_steps: Vec::new(),
            help_link: None,
        }
    }

    /// Adds a feature bullet list.
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

/// Structured completion metrics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionMetrics {
    pub steps_completed: u32,
    pub features_explored: u32,
}

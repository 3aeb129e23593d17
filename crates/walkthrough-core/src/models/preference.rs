//! Persisted skip preference for the welcome screen.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether the walkthrough should offer itself automatically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkipPreference {
    /// Always offer the walkthrough on entry
    AlwaysShow,

    /// Never offer it again
    NeverShow,

    /// Offer it until it has been completed once
    #[default]
    Ask,
}

impl SkipPreference {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipPreference::AlwaysShow => "always_show",
            SkipPreference::NeverShow => "never_show",
            SkipPreference::Ask => "ask",
        }
    }
}

impl FromStr for SkipPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always_show" | "always" => Ok(SkipPreference::AlwaysShow),
            "never_show" | "never" => Ok(SkipPreference::NeverShow),
            "ask" => Ok(SkipPreference::Ask),
            _ => Err(format!("Invalid skip preference: {s}")),
        }
    }
}

//! Playback speed enumeration.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::WalkthroughError;

/// Autoplay speed multiplier, restricted to a fixed set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PlaybackSpeed {
    #[serde(rename = "0.5x")]
    Half,

    #[default]
    #[serde(rename = "1x")]
    Normal,

    #[serde(rename = "1.5x")]
    OneAndHalf,

    #[serde(rename = "2x")]
    Double,
}

impl PlaybackSpeed {
    /// Every supported speed, slowest first.
    pub const ALL: [PlaybackSpeed; 4] = [
        PlaybackSpeed::Half,
        PlaybackSpeed::Normal,
        PlaybackSpeed::OneAndHalf,
        PlaybackSpeed::Double,
    ];

    /// Factor by which nominal step durations are divided.
    pub fn multiplier(&self) -> f64 {
        match self {
            PlaybackSpeed::Half => 0.5,
            PlaybackSpeed::Normal => 1.0,
            PlaybackSpeed::OneAndHalf => 1.5,
            PlaybackSpeed::Double => 2.0,
        }
    }

    /// Default per-step duration at this speed, used as the floor for a
    /// step's configured duration before the multiplier is applied.
    pub fn minimum_dwell(&self) -> Duration {
        match self {
            PlaybackSpeed::Half => Duration::from_secs(20),
            PlaybackSpeed::Normal => Duration::from_secs(12),
            PlaybackSpeed::OneAndHalf => Duration::from_secs(9),
            PlaybackSpeed::Double => Duration::from_secs(6),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackSpeed::Half => "0.5x",
            PlaybackSpeed::Normal => "1x",
            PlaybackSpeed::OneAndHalf => "1.5x",
            PlaybackSpeed::Double => "2x",
        }
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaybackSpeed {
    type Err = WalkthroughError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0.5x" | "0.5" | "slow" => Ok(PlaybackSpeed::Half),
            "1x" | "1" | "1.0" | "normal" => Ok(PlaybackSpeed::Normal),
            "1.5x" | "1.5" => Ok(PlaybackSpeed::OneAndHalf),
            "2x" | "2" | "2.0" | "fast" => Ok(PlaybackSpeed::Double),
            _ => Err(WalkthroughError::InvalidSpeed {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<f64> for PlaybackSpeed {
    type Error = WalkthroughError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|speed| (speed.multiplier() - value).abs() < f64::EPSILON)
            .ok_or_else(|| WalkthroughError::InvalidSpeed {
                value: value.to_string(),
            })
    }
}

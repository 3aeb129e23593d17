//! Data models for the guided walkthrough.
//!
//! This module contains the static, read-only description of a walkthrough:
//! steps, the hotspots anchored on each step, and the modal payloads they
//! reveal. It also holds the small enumerations the session state machine
//! uses (playback speed, skip preference).
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data and presentation apart.
//!
//! # Examples
//!
//! ```rust
//! use walkthrough_core::models::{PlaybackSpeed, StepKind};
//!
//! let speed: PlaybackSpeed = "2x".parse()?;
//! assert_eq!(speed.multiplier(), 2.0);
//! assert_eq!(StepKind::Navigation.as_str(), "navigation");
//! # Ok::<(), walkthrough_core::WalkthroughError>(())
//! ```

pub mod hotspot;
pub mod modal;
pub mod preference;
pub mod route;
pub mod speed;
pub mod step;


pub use hotspot::{Hotspot, HotspotKind, Side};
pub use modal::{CompletionMetrics, ModalContent};
pub use preference::SkipPreference;
pub use route::route_matches;
pub use speed::PlaybackSpeed;
pub use step::{Step, StepKind};

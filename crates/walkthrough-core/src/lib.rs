//! Core library for the guided walkthrough player.
//!
//! A walkthrough is a static, ordered [`Catalog`] of steps played by a
//! session state machine. Around it sit three collaborators:
//!
//! - [`resolver`]: places each hotspot marker next to its anchor element,
//!   flipping sides near the viewport edge
//! - [`autoplay`]: a cooperative per-frame timer that advances the session
//!   after a speed-adjusted duration
//! - [`store`]: durable flags (completion, skip preference, resumable
//!   progress) in SQLite
//!
//! Hosts never touch [`SessionState`] directly: they call methods on
//! [`Walkthrough`] and observe the [`Signal`]s it publishes. Rendering is
//! markdown produced by the [`display`] wrappers.
//!
//! # Quick Start
//!
//! ```rust
//! use walkthrough_core::WalkthroughBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut walkthrough = WalkthroughBuilder::new()
//!     .with_database_path(Some("walkthrough.db"))
//!     .build()
//!     .await?;
//!
//! if walkthrough.should_auto_start() {
//!     walkthrough.start();
//!     walkthrough.close_welcome();
//! }
//! walkthrough.advance();
//! println!("{}", walkthrough.current_step());
//! # Ok(())
//! # }
//! ```

pub mod autoplay;
pub mod builder;
pub mod catalog;
pub mod display;
pub mod error;
pub mod models;
pub mod resolver;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use autoplay::{effective_duration, AutoplayTimer, Tick};
pub use builder::WalkthroughBuilder;
pub use catalog::Catalog;
pub use error::{Result, WalkthroughError};
pub use models::{
    Hotspot, HotspotKind, ModalContent, PlaybackSpeed, Side, SkipPreference, Step, StepKind,
};
pub use resolver::{
    resolve_all, resolve_hotspot, Layout, PositionResolver, Rect, ResolvedHotspot, StaticLayout,
};
pub use session::{transition, Intent, Key, SessionState, Signal, Walkthrough};
pub use store::{FlagStore, MemoryFlagStore, PersistedFlags, SqliteFlagStore, StoredProgress};

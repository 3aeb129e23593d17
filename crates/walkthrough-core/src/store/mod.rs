//! Durable walkthrough flags.
//!
//! Only a handful of values outlive a session: whether the sequence was
//! ever completed (and when), the user's skip preference, and an optional
//! progress snapshot used to resume an abandoned tour. Everything else in
//! [`crate::SessionState`] is session-scoped.
//!
//! Callers treat every [`FlagStore`] failure as "no prior session"; the
//! sequence keeps working without durable storage.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{error::Result, models::SkipPreference};

mod memory;
mod sqlite;

pub use memory::MemoryFlagStore;
pub use sqlite::SqliteFlagStore;

/// Values read back from durable storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersistedFlags {
    pub completed_before: bool,
    pub completed_at: Option<Timestamp>,
    pub skip_preference: SkipPreference,
    pub progress: Option<StoredProgress>,
}

/// Resumable part of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProgress {
    pub step: u32,
    pub visited_steps: Vec<u32>,
    pub visited_hotspots: Vec<String>,
}

/// Backend for durable walkthrough flags.
pub trait FlagStore {
    /// Reads all persisted values.
    fn load(&self) -> Result<PersistedFlags>;

    /// Records that the sequence was completed at `at`.
    fn mark_completed(&self, at: Timestamp) -> Result<()>;

    fn save_skip_preference(&self, preference: SkipPreference) -> Result<()>;

    fn save_progress(&self, progress: &StoredProgress) -> Result<()>;

    fn clear_progress(&self) -> Result<()>;

    /// Forgets everything, as if the sequence had never been shown.
    fn reset(&self) -> Result<()>;
}

use std::sync::{Mutex, MutexGuard};

use jiff::Timestamp;

use super::{FlagStore, PersistedFlags, StoredProgress};
use crate::{
    error::{Result, WalkthroughError},
    models::SkipPreference,
};

/// Process-local store, used when no durable storage is available and in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryFlagStore {
    flags: Mutex<PersistedFlags>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `flags`.
    pub fn with_flags(flags: PersistedFlags) -> Self {
        Self {
            flags: Mutex::new(flags),
        }
    }

    fn flags(&self) -> Result<MutexGuard<'_, PersistedFlags>> {
        self.flags.lock().map_err(|_| WalkthroughError::Configuration {
            message: "Flag store lock poisoned".to_string(),
        })
    }
}

impl FlagStore for MemoryFlagStore {
    fn load(&self) -> Result<PersistedFlags> {
        Ok(self.flags()?.clone())
    }

    fn mark_completed(&self, at: Timestamp) -> Result<()> {
        let mut flags = self.flags()?;
        flags.completed_before = true;
        flags.completed_at = Some(at);
        Ok(())
    }

    fn save_skip_preference(&self, preference: SkipPreference) -> Result<()> {
        self.flags()?.skip_preference = preference;
        Ok(())
    }

    fn save_progress(&self, progress: &StoredProgress) -> Result<()> {
        self.flags()?.progress = Some(progress.clone());
        Ok(())
    }

    fn clear_progress(&self) -> Result<()> {
        self.flags()?.progress = None;
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        *self.flags()? = PersistedFlags::default();
        Ok(())
    }
}

//! Builder for creating and configuring [`Walkthrough`] instances.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use tokio::task;

use crate::{
    catalog::Catalog,
    error::{Result, WalkthroughError},
    models::PlaybackSpeed,
    session::Walkthrough,
    store::{FlagStore, MemoryFlagStore, SqliteFlagStore},
};

/// Builder for creating and configuring walkthrough sessions.
#[derive(Debug, Clone, Default)]
pub struct WalkthroughBuilder {
    database_path: Option<PathBuf>,
    catalog: Option<Catalog>,
    speed: Option<PlaybackSpeed>,
    in_memory: bool,
}

impl WalkthroughBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/walkthrough/walkthrough.db` or
    /// `~/.local/share/walkthrough/walkthrough.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the given catalog instead of the built-in DeepSafe tour.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Initial playback speed.
    pub fn with_speed(mut self, speed: PlaybackSpeed) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Keeps flags in memory only; nothing survives the process.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Builds the configured walkthrough.
    ///
    /// Durable storage that cannot be opened is not an error: the session
    /// falls back to in-memory flags and logs a warning.
    ///
    /// # Errors
    ///
    /// Returns `WalkthroughError::Configuration` if the storage task cannot
    /// be joined.
    pub async fn build(self) -> Result<Walkthrough> {
        let store: Box<dyn FlagStore + Send> = if self.in_memory {
            Box::new(MemoryFlagStore::new())
        } else {
            match Self::open_store(self.database_path).await? {
                Ok(store) => Box::new(store),
                Err(e) => {
                    warn!("Durable storage unavailable, flags will not persist: {e}");
                    Box::new(MemoryFlagStore::new())
                }
            }
        };

        let mut walkthrough = Walkthrough::new(self.catalog.unwrap_or_else(Catalog::deepsafe), store);
        if let Some(speed) = self.speed {
            walkthrough.set_playback_speed(speed);
        }
        Ok(walkthrough)
    }

    // Outer error: the blocking task itself failed. Inner: storage failed.
    async fn open_store(path: Option<PathBuf>) -> Result<Result<SqliteFlagStore>> {
        let db_path = match path {
            Some(path) => path,
            None => match Self::default_database_path() {
                Ok(path) => path,
                Err(e) => return Ok(Err(e)),
            },
        };
        debug!("Opening flag store at {}", db_path.display());

        task::spawn_blocking(move || {
            if let Some(parent) = db_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| WalkthroughError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
            SqliteFlagStore::new(&db_path)
        })
        .await
        .map_err(|e| WalkthroughError::Configuration {
            message: format!("Task join error: {e}"),
        })
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("walkthrough")
            .place_data_file("walkthrough.db")
            .map_err(|e| WalkthroughError::XdgDirectory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_build_creates_database_and_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("walkthrough.db");

        let walkthrough = WalkthroughBuilder::new()
            .with_database_path(Some(&db_path))
            .with_speed(PlaybackSpeed::Double)
            .build()
            .await
            .unwrap();

        assert!(db_path.exists());
        assert_eq!(walkthrough.state().playback_speed, PlaybackSpeed::Double);
        assert_eq!(walkthrough.catalog().total_steps(), 15);
        assert!(!walkthrough.state().is_active);
    }

    #[tokio::test]
    async fn test_unusable_path_degrades_to_memory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let mut walkthrough = WalkthroughBuilder::new()
            .with_database_path(Some(blocker.join("walkthrough.db")))
            .build()
            .await
            .unwrap();

        walkthrough.start();
        assert!(walkthrough.state().is_active);
    }
}

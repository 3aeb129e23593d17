use std::path::{Path, PathBuf};

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection};

use super::{FlagStore, PersistedFlags, StoredProgress};
use crate::{
    error::{DatabaseResultExt, Result},
    models::SkipPreference,
};

const SELECT_FLAGS_SQL: &str = "SELECT completed_before, completed_at, skip_preference, progress FROM walkthrough_flags WHERE id = 1";
const UPDATE_COMPLETED_SQL: &str =
    "UPDATE walkthrough_flags SET completed_before = 1, completed_at = ?1 WHERE id = 1";
const UPDATE_PREFERENCE_SQL: &str =
    "UPDATE walkthrough_flags SET skip_preference = ?1 WHERE id = 1";
const UPDATE_PROGRESS_SQL: &str = "UPDATE walkthrough_flags SET progress = ?1 WHERE id = 1";
const RESET_FLAGS_SQL: &str = "UPDATE walkthrough_flags SET completed_before = 0, completed_at = NULL, skip_preference = 'ask', progress = NULL WHERE id = 1";

/// SQLite-backed flag store.
///
/// Opens a fresh connection per operation so the store can be moved across
/// threads and shared by short-lived CLI invocations.
#[derive(Debug, Clone)]
pub struct SqliteFlagStore {
    db_path: PathBuf,
}

impl SqliteFlagStore {
    /// Opens (creating if needed) the database at `path` and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            db_path: path.as_ref().to_path_buf(),
        };
        store.connect()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        let connection =
            Connection::open(&self.db_path).db_context("Failed to open database connection")?;
        connection
            .execute_batch(include_str!("../../assets/schema.sql"))
            .db_context("Failed to initialize database schema")?;
        Ok(connection)
    }

    fn execute(&self, sql: &str, params: impl rusqlite::Params, context: &str) -> Result<()> {
        self.connect()?.execute(sql, params).db_context(context)?;
        Ok(())
    }
}

impl FlagStore for SqliteFlagStore {
    fn load(&self) -> Result<PersistedFlags> {
        let connection = self.connect()?;
        let (completed_before, completed_at, preference, progress) = connection
            .query_row(SELECT_FLAGS_SQL, [], |row| {
                let completed_at = row
                    .get::<_, Option<String>>(1)?
                    .map(|s| s.parse::<Timestamp>())
                    .transpose()
                    .map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e))
                    })?;
                let preference_str: String = row.get(2)?;
                let preference = preference_str.parse::<SkipPreference>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        Type::Text,
                        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
                    )
                })?;

                Ok((
                    row.get::<_, bool>(0)?,
                    completed_at,
                    preference,
                    row.get::<_, Option<String>>(3)?,
                ))
            })
            .db_context("Failed to read walkthrough flags")?;

        let progress = progress
            .map(|json| serde_json::from_str::<StoredProgress>(&json))
            .transpose()?;

        Ok(PersistedFlags {
            completed_before,
            completed_at,
            skip_preference: preference,
            progress,
        })
    }

    fn mark_completed(&self, at: Timestamp) -> Result<()> {
        self.execute(
            UPDATE_COMPLETED_SQL,
            params![at.to_string()],
            "Failed to record completion",
        )
    }

    fn save_skip_preference(&self, preference: SkipPreference) -> Result<()> {
        self.execute(
            UPDATE_PREFERENCE_SQL,
            params![preference.as_str()],
            "Failed to save skip preference",
        )
    }

    fn save_progress(&self, progress: &StoredProgress) -> Result<()> {
        let json = serde_json::to_string(progress)?;
        self.execute(UPDATE_PROGRESS_SQL, params![json], "Failed to save progress")
    }

    fn clear_progress(&self) -> Result<()> {
        self.execute(
            UPDATE_PROGRESS_SQL,
            params![Option::<String>::None],
            "Failed to clear progress",
        )
    }

    fn reset(&self) -> Result<()> {
        self.execute(RESET_FLAGS_SQL, [], "Failed to reset walkthrough flags")
    }
}

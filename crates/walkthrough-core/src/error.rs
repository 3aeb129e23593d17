//! Error types for the walkthrough library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for all walkthrough operations.
///
/// Out-of-range step requests are not errors: the session clamps them. Only
/// caller contract violations (an unknown playback speed, a malformed
/// catalog) and I/O failures surface here.
#[derive(Error, Debug)]
pub enum WalkthroughError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Step not found for the given ID
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u32 },
    /// Hotspot not found on the given step
    #[error("Hotspot '{id}' not found on step {step}")]
    HotspotNotFound { step: u32, id: String },
    /// Playback speed outside the supported set
    #[error("Invalid playback speed: {value}")]
    InvalidSpeed { value: String },
    /// Step catalog failed validation at load time
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WalkthroughError {
        WalkthroughError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WalkthroughError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a catalog validation error.
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            reason: reason.into(),
        }
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::Database {
            message: message.to_string(),
            source,
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WalkthroughError::database_error(message, e))
    }
}

/// Result type alias for walkthrough operations
pub type Result<T> = std::result::Result<T, WalkthroughError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = WalkthroughError::invalid_input("speed").with_reason("must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'speed': must be positive"
        );
    }

    #[test]
    fn test_db_context_wraps_source() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::InvalidQuery);
        let err = result.db_context("Failed to read flags").unwrap_err();
        match err {
            WalkthroughError::Database { message, .. } => {
                assert_eq!(message, "Failed to read flags")
            }
            other => panic!("Expected Database error, got {other:?}"),
        }
    }
}

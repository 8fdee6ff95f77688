//! Error types for Horizon Grid.
//!
//! Validation failures are not errors; they are reported as
//! [`ValidationResult`](crate::editor::ValidationResult) values. The
//! variants here cover configuration, interchange and host wiring mistakes.

use std::path::PathBuf;

use horizon_grid_core::EditLockError;

/// Result type alias for grid editing operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while configuring or driving editors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Editor settings could not be decoded.
    #[error("Invalid editor settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// Settings file could not be read.
    #[error("Failed to read editor settings '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Item JSON could not be encoded or decoded.
    #[error("Item JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A composite editor column has an editor but no mount container.
    #[error("No container supplied for editable column '{column}'")]
    MissingContainer { column: String },

    /// An edit session was requested for a column without an editor.
    #[error("Column '{column}' is not editable")]
    NotEditable { column: String },

    /// The edit lock is held by another session.
    #[error(transparent)]
    EditLock(#[from] EditLockError),
}

impl GridError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = GridError::MissingContainer {
            column: "title".into(),
        };
        assert_eq!(err.to_string(), "No container supplied for editable column 'title'");

        let err = GridError::NotEditable { column: "id".into() };
        assert_eq!(err.to_string(), "Column 'id' is not editable");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = GridError::io(
            "editors.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("editors.toml"));
        assert!(err.source().is_some());
    }
}

//! Error types for `contacts-lib`.
//!
//! Lookups on unknown ids are not errors here: store operations return
//! `Option` and treat a missing id as a no-op.

use thiserror::Error;

/// Primary error type for contacts-lib operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {errors:?}")]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Unknown interaction type.
    #[error("Invalid interaction type: {value} (expected call, email, meeting or note)")]
    InvalidInteractionType { value: String },

    // === Snapshot Errors ===
    /// A persisted record could not be decoded.
    #[error("Snapshot parse error in '{record}': {reason}")]
    SnapshotParse { record: String, reason: String },

    /// A persisted record was written by a newer format.
    #[error("Snapshot '{record}' has version {found}, newest supported is {supported}")]
    UnsupportedSnapshotVersion {
        record: String,
        found: u32,
        supported: u32,
    },

    /// Generic storage error reported by a snapshot backend.
    #[error("Storage error: {0}")]
    Storage(String),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl TrackerError {
    /// Collapse a list of field errors into one error value.
    ///
    /// A single error keeps the flat `Validation` shape.
    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_validation_error_is_flattened() {
        let err = TrackerError::from_validation_errors(vec![ValidationError::new(
            "name",
            "cannot be empty",
        )]);
        assert!(matches!(err, TrackerError::Validation { ref field, .. } if field == "name"));
        assert_eq!(err.to_string(), "Validation failed: name: cannot be empty");
    }

    #[test]
    fn test_multiple_validation_errors_are_kept() {
        let err = TrackerError::from_validation_errors(vec![
            ValidationError::new("name", "cannot be empty"),
            ValidationError::new("email", "cannot be empty"),
        ]);
        match err {
            TrackerError::ValidationErrors { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}

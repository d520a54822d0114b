//! Error types for coursekit

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for coursekit
#[derive(Debug, Error)]
pub enum CourseKitError {
    /// Template kind is not in the registry
    #[error("Unknown template type '{kind}' (available: {available})")]
    UnknownTemplate { kind: String, available: String },

    /// Template file is missing on disk
    #[error("Template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Export format is not supported
    #[error("Unknown format '{0}' (available: html, pdf, markdown, slides, script)")]
    UnsupportedFormat(String),

    /// Notebook to export does not exist
    #[error("Notebook not found: {0}")]
    NotebookNotFound(PathBuf),

    /// Directory to walk does not exist
    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid glob pattern
    #[error("Invalid pattern: {0}")]
    Pattern(String),

    /// External program could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// External command exited with a failure status
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CourseKitError>,
    },
}

impl CourseKitError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CourseKitError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<toml::de::Error> for CourseKitError {
    fn from(err: toml::de::Error) -> Self {
        CourseKitError::Toml(err.to_string())
    }
}

impl From<globset::Error> for CourseKitError {
    fn from(err: globset::Error) -> Self {
        CourseKitError::Pattern(err.to_string())
    }
}

/// Result type alias for coursekit
pub type Result<T> = std::result::Result<T, CourseKitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CourseKitError::UnknownTemplate {
            kind: "lecture".to_string(),
            available: "chapter, practical, notes".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown template type 'lecture' (available: chapter, practical, notes)"
        );
    }

    #[test]
    fn test_error_with_context() {
        let err = CourseKitError::NotebookNotFound(PathBuf::from("missing.ipynb"));
        let err = err.with_context("Failed to export");
        assert!(err.to_string().contains("Failed to export"));
        assert!(err.to_string().contains("missing.ipynb"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CourseKitError = io_err.into();
        assert!(matches!(err, CourseKitError::Io(_)));
    }
}

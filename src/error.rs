//! Error types for orgenda

use crate::domain::mutator::EditError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for orgenda
#[derive(Debug, Error)]
pub enum OrgendaError {
    #[error("Target not found: {0}")]
    TargetNotFound(String),

    #[error("Line {line} is out of range for {document} ({len} lines)")]
    LineOutOfRange {
        document: String,
        line: usize,
        len: usize,
    },

    #[error("Line {line} of {document} is not a headline")]
    NotAHeadline { document: String, line: usize },

    #[error("Line {line} of {document} is not a task (no status keyword)")]
    NotATask { document: String, line: usize },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Empty document path")]
    EmptyDocumentPath,

    #[error("No target file specified and no default file configured")]
    NoTargetFile,

    #[error("Unknown config key: {0}")]
    UnknownConfigKey(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl OrgendaError {
    /// Attach the document to a line-level edit failure.
    pub fn from_edit(err: EditError, document: &Path) -> Self {
        let document = document.display().to_string();
        match err {
            EditError::LineOutOfRange { line, len } => OrgendaError::LineOutOfRange {
                document,
                line,
                len,
            },
            EditError::NotAHeadline { line } => OrgendaError::NotAHeadline { document, line },
            EditError::NotATask { line } => OrgendaError::NotATask { document, line },
            EditError::TargetNotFound(target) => {
                OrgendaError::TargetNotFound(format!("{} in {}", target, document))
            }
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            OrgendaError::TargetNotFound(_) => 2,
            OrgendaError::LineOutOfRange { .. }
            | OrgendaError::NotAHeadline { .. }
            | OrgendaError::NotATask { .. }
            | OrgendaError::InvalidLocation(_)
            | OrgendaError::EmptyDocumentPath => 3,
            OrgendaError::InvalidDate(_) | OrgendaError::InvalidArgument(_) => 4,
            OrgendaError::NoTargetFile
            | OrgendaError::UnknownConfigKey(_)
            | OrgendaError::Config(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            OrgendaError::TargetNotFound(target) => {
                format!(
                    "Target not found: {}\n\n\
                    Suggestions:\n\
                    • Heading titles are matched exactly (case-sensitive)\n\
                    • Each --olp segment must be nested under the previous one\n\
                    • Check the target file with 'orgenda todo list --status TODO'",
                    target
                )
            }
            OrgendaError::NoTargetFile => "No target file specified and no default file configured.\n\n\
                Suggestions:\n\
                • Pass --file <path>\n\
                • Configure one: orgenda config set default_file ~/org/inbox.org\n\
                • Add org files: orgenda config add-path ~/org"
                .to_string(),
            OrgendaError::InvalidLocation(raw) => {
                format!(
                    "Invalid location: '{}'\n\n\
                    Expected format: FILE:LINE (line numbers start at 1)\n\
                    Example: orgenda todo done ~/org/inbox.org:12",
                    raw
                )
            }
            OrgendaError::InvalidDate(raw) => {
                format!(
                    "Invalid date: '{}'\n\n\
                    Expected format: YYYY-MM-DD (optionally wrapped in <...>)\n\
                    Example: orgenda todo add 'Pay rent' --deadline 2026-01-31",
                    raw
                )
            }
            OrgendaError::UnknownConfigKey(key) => {
                format!(
                    "Unknown config key: '{}'\n\n\
                    Valid keys: default_file, capture.default_file, capture.format, \
                    capture.prepend, capture.heading",
                    key
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using OrgendaError
pub type Result<T> = std::result::Result<T, OrgendaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_not_found_suggestions() {
        let err = OrgendaError::TargetNotFound("Project / Inbox".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("Project / Inbox"));
        assert!(msg.contains("case-sensitive"));
        assert!(msg.contains("--olp"));
    }

    #[test]
    fn test_no_target_file_suggestions() {
        let msg = OrgendaError::NoTargetFile.display_with_suggestions();
        assert!(msg.contains("--file"));
        assert!(msg.contains("config set default_file"));
    }

    #[test]
    fn test_invalid_location_example() {
        let msg = OrgendaError::InvalidLocation("inbox.org".to_string()).display_with_suggestions();
        assert!(msg.contains("FILE:LINE"));
        assert!(msg.contains("inbox.org"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(OrgendaError::TargetNotFound("x".into()).exit_code(), 2);
        assert_eq!(OrgendaError::EmptyDocumentPath.exit_code(), 3);
        assert_eq!(OrgendaError::InvalidDate("x".into()).exit_code(), 4);
        assert_eq!(OrgendaError::NoTargetFile.exit_code(), 5);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(OrgendaError::Io(io).exit_code(), 1);
    }

    #[test]
    fn test_from_edit_names_document() {
        let err = OrgendaError::from_edit(
            EditError::NotATask { line: 4 },
            Path::new("inbox.org"),
        );
        assert_eq!(err.to_string(), "Line 4 of inbox.org is not a task (no status keyword)");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = OrgendaError::Config("broken".to_string());
        assert_eq!(err.display_with_suggestions(), "Configuration error: broken");
    }
}

//! Error types and exit codes for braidmap
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Document data error (not a mind map, malformed tag, flagged document)

use thiserror::Error;

/// Exit codes for the braidmap CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Document data error - malformed or inconsistent document (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during braidmap operations
#[derive(Error, Debug)]
pub enum BraidmapError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    // Document data errors (exit code 3)
    #[error("not a mind map: {reason}")]
    NotAMindMap { reason: String },

    #[error("invalid note tag: {reason}")]
    InvalidNoteTag { reason: String },

    #[error("invalid map settings: {reason}")]
    InvalidMapSettings { reason: String },

    #[error("invalid study record: {reason}")]
    InvalidStudyRecord { reason: String },

    #[error("document flagged with {count} warning(s); no edits applied")]
    DocumentFlagged { count: usize },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl BraidmapError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BraidmapError::UnknownFormat(_) | BraidmapError::UsageError(_) => ExitCode::Usage,

            BraidmapError::NotAMindMap { .. }
            | BraidmapError::InvalidNoteTag { .. }
            | BraidmapError::InvalidMapSettings { .. }
            | BraidmapError::InvalidStudyRecord { .. }
            | BraidmapError::DocumentFlagged { .. }
            | BraidmapError::AlreadyExists { .. } => ExitCode::Data,

            BraidmapError::Io(_)
            | BraidmapError::Json(_)
            | BraidmapError::Toml(_)
            | BraidmapError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            BraidmapError::UnknownFormat(_) => "unknown_format",
            BraidmapError::UsageError(_) => "usage_error",
            BraidmapError::NotAMindMap { .. } => "not_a_mind_map",
            BraidmapError::InvalidNoteTag { .. } => "invalid_note_tag",
            BraidmapError::InvalidMapSettings { .. } => "invalid_map_settings",
            BraidmapError::InvalidStudyRecord { .. } => "invalid_study_record",
            BraidmapError::DocumentFlagged { .. } => "document_flagged",
            BraidmapError::AlreadyExists { .. } => "already_exists",
            BraidmapError::Io(_) => "io_error",
            BraidmapError::Json(_) => "json_error",
            BraidmapError::Toml(_) => "toml_error",
            BraidmapError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for braidmap operations
pub type Result<T> = std::result::Result<T, BraidmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            BraidmapError::UnknownFormat("xml".into()).exit_code(),
            ExitCode::Usage
        );
        assert_eq!(
            BraidmapError::DocumentFlagged { count: 2 }.exit_code(),
            ExitCode::Data
        );
        assert_eq!(
            BraidmapError::Other("boom".into()).exit_code(),
            ExitCode::Failure
        );
    }

    #[test]
    fn test_to_json_envelope() {
        let err = BraidmapError::NotAMindMap {
            reason: "missing title".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"]["code"], 3);
        assert_eq!(json["error"]["type"], "not_a_mind_map");
    }
}

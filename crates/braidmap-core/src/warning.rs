//! Warning codes for flagged documents

use serde::Serialize;

/// Category of a document warning
///
/// Codes are stable because they are persisted in warning tags inside the
/// document text. Codes 2 and 3 are legacy and are still recognized when
/// dismissing, but synchronization no longer emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    EmptyLine,
    Invalid,
    DuplicateRelation,
    DuplicateKeyWord,
    LinkConflict,
    ContentNotDefined,
    ContentConflict,
}

impl WarningKind {
    /// Numeric code persisted in warning tags
    pub fn code(self) -> u8 {
        match self {
            WarningKind::EmptyLine => 0,
            WarningKind::Invalid => 1,
            WarningKind::DuplicateRelation => 2,
            WarningKind::DuplicateKeyWord => 3,
            WarningKind::LinkConflict => 4,
            WarningKind::ContentNotDefined => 5,
            WarningKind::ContentConflict => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(WarningKind::EmptyLine),
            1 => Some(WarningKind::Invalid),
            2 => Some(WarningKind::DuplicateRelation),
            3 => Some(WarningKind::DuplicateKeyWord),
            4 => Some(WarningKind::LinkConflict),
            5 => Some(WarningKind::ContentNotDefined),
            6 => Some(WarningKind::ContentConflict),
            _ => None,
        }
    }

    /// Human-readable description shown in check output
    pub fn message(self) -> &'static str {
        match self {
            WarningKind::EmptyLine => "empty line inside the outline",
            WarningKind::Invalid => "line is not a valid outline entry",
            WarningKind::DuplicateRelation => "duplicate relation",
            WarningKind::DuplicateKeyWord => "duplicate key word",
            WarningKind::LinkConflict => "linked notes define children in more than one place",
            WarningKind::ContentNotDefined => "linked id has no content anywhere",
            WarningKind::ContentConflict => "linked notes disagree on content",
        }
    }
}

/// A warning attached to a zero-based document line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Warning {
    pub line: usize,
    pub kind: WarningKind,
}

impl Warning {
    pub fn new(line: usize, kind: WarningKind) -> Self {
        Warning { line, kind }
    }
}

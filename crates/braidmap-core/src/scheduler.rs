//! Study scheduler records
//!
//! Each studyable note carries a compact scheduling record persisted inside
//! its note tag. The record is a fixed field list so that the encoded tag
//! stays byte-stable across synchronization runs.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BraidmapError, Result};

/// Number of fields in an encoded study record
pub const CARD_FIELDS: usize = 9;

/// Lifecycle state of a study card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    #[default]
    New,
    Learning,
    Review,
    Relearning,
}

impl CardState {
    /// Numeric code used in the encoded record
    pub fn code(self) -> u8 {
        match self {
            CardState::New => 0,
            CardState::Learning => 1,
            CardState::Review => 2,
            CardState::Relearning => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(CardState::New),
            1 => Some(CardState::Learning),
            2 => Some(CardState::Review),
            3 => Some(CardState::Relearning),
            _ => None,
        }
    }
}

/// Scheduling record attached to a studyable note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyCard {
    pub due: DateTime<Utc>,
    pub stability: f64,
    pub difficulty: f64,
    pub elapsed_days: f64,
    pub scheduled_days: f64,
    pub reps: u32,
    pub lapses: u32,
    pub state: CardState,
    pub last_review: Option<DateTime<Utc>>,
}

impl StudyCard {
    /// Fresh card due immediately, never reviewed
    pub fn new(due: DateTime<Utc>) -> Self {
        StudyCard {
            due,
            stability: 0.0,
            difficulty: 0.0,
            elapsed_days: 0.0,
            scheduled_days: 0.0,
            reps: 0,
            lapses: 0,
            state: CardState::New,
            last_review: None,
        }
    }

    /// Decode a study record from its semicolon-split fields
    ///
    /// The trailing last-review field may be absent or empty for cards that
    /// have never been reviewed.
    pub fn decode(fields: &[&str]) -> Result<Self> {
        if fields.len() != CARD_FIELDS && fields.len() != CARD_FIELDS - 1 {
            return Err(BraidmapError::InvalidStudyRecord {
                reason: format!("expected {} fields, got {}", CARD_FIELDS, fields.len()),
            });
        }

        let due = parse_instant(fields[0])?;
        let stability = parse_number(fields[1], "stability")?;
        let difficulty = parse_number(fields[2], "difficulty")?;
        let elapsed_days = parse_number(fields[3], "elapsed days")?;
        let scheduled_days = parse_number(fields[4], "scheduled days")?;
        let reps = parse_count(fields[5], "reps")?;
        let lapses = parse_count(fields[6], "lapses")?;
        let state_code = parse_count(fields[7], "state")?;
        let state = CardState::from_code(state_code as u8).ok_or_else(|| {
            BraidmapError::InvalidStudyRecord {
                reason: format!("unknown state code: {}", state_code),
            }
        })?;
        let last_review = match fields.get(8) {
            None => None,
            Some(raw) if raw.is_empty() => None,
            Some(raw) => Some(parse_instant(raw)?),
        };

        Ok(StudyCard {
            due,
            stability,
            difficulty,
            elapsed_days,
            scheduled_days,
            reps,
            lapses,
            state,
            last_review,
        })
    }

    /// Encode the record as its semicolon-joined field list
    pub fn encode(&self) -> String {
        format!(
            "{};{};{};{};{};{};{};{};{}",
            format_instant(&self.due),
            self.stability,
            self.difficulty,
            self.elapsed_days,
            self.scheduled_days,
            self.reps,
            self.lapses,
            self.state.code(),
            self.last_review.as_ref().map(format_instant).unwrap_or_default(),
        )
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| BraidmapError::InvalidStudyRecord {
            reason: format!("bad timestamp {:?}: {}", raw, e),
        })
}

fn parse_number(raw: &str, field: &str) -> Result<f64> {
    raw.parse().map_err(|_| BraidmapError::InvalidStudyRecord {
        reason: format!("bad {}: {:?}", field, raw),
    })
}

fn parse_count(raw: &str, field: &str) -> Result<u32> {
    raw.parse().map_err(|_| BraidmapError::InvalidStudyRecord {
        reason: format!("bad {}: {:?}", field, raw),
    })
}

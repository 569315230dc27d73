//! Inline tag codec
//!
//! Braidmap persists computed structure inside the document itself using
//! comment tags that editors render invisibly:
//!
//! - `%%note <path>;<studyable>[;<study record>]%%` on outline lines
//! - `%%map <settings>%%` on its own line near the top of the document
//! - `%%warn <code>%%` appended to flagged lines
//!
//! Visible content may additionally end in `#some-id` to bind the note to an
//! explicit link id, or in `*` to suppress linking entirely.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;

use crate::document::{LinkTag, NoteProperties};
use crate::error::{BraidmapError, Result};
use crate::scheduler::StudyCard;
use crate::warning::WarningKind;

pub const NOTE_TAG_OPEN: &str = "%%note ";
pub const MAP_TAG_OPEN: &str = "%%map ";
pub const WARN_TAG_OPEN: &str = "%%warn ";
pub const TAG_CLOSE: &str = "%%";

static NOTE_RE: OnceLock<Regex> = OnceLock::new();
static MAP_RE: OnceLock<Regex> = OnceLock::new();
static WARN_RE: OnceLock<Regex> = OnceLock::new();
static INLINE_ID_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn note_re() -> &'static Regex {
    NOTE_RE.get_or_init(|| Regex::new(r"%%note (.*?)%%").expect("static regex"))
}

#[allow(clippy::expect_used)]
fn map_re() -> &'static Regex {
    MAP_RE.get_or_init(|| Regex::new(r"^%%map (.*?)%%$").expect("static regex"))
}

#[allow(clippy::expect_used)]
fn warn_re() -> &'static Regex {
    WARN_RE.get_or_init(|| Regex::new(r" ?%%warn ([0-9]+)%%").expect("static regex"))
}

#[allow(clippy::expect_used)]
fn inline_id_re() -> &'static Regex {
    INLINE_ID_RE.get_or_init(|| Regex::new(r"(?:^|\s)#(?P<id>[A-Za-z0-9_-]+)$").expect("static regex"))
}

/// Byte span of the note tag within a line, if present
pub fn note_tag_span(line: &str) -> Option<(usize, usize)> {
    note_re().find(line).map(|m| (m.start(), m.end()))
}

/// Body of the note tag within a line, if present
pub fn note_tag_body(line: &str) -> Option<&str> {
    note_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Body of a map settings tag when the line consists of exactly that tag
pub fn map_tag_body(line: &str) -> Option<&str> {
    map_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Decode a note tag body into note properties
pub fn decode_note_tag(body: &str) -> Result<NoteProperties> {
    let mut fields: Vec<&str> = body.split(';').collect();
    // Tolerate a field-terminating semicolon before the tag close
    if fields.len() > 2 && fields.last() == Some(&"") {
        fields.pop();
    }
    if fields.len() < 2 {
        return Err(BraidmapError::InvalidNoteTag {
            reason: format!("expected at least 2 fields, got {}", fields.len()),
        });
    }

    let path = if fields[0].is_empty() {
        Vec::new()
    } else {
        fields[0].split('\\').map(str::to_string).collect()
    };

    let study = match fields[1] {
        "true" => true,
        "false" => false,
        other => {
            return Err(BraidmapError::InvalidNoteTag {
                reason: format!("bad studyable flag: {:?}", other),
            })
        }
    };

    let card = if fields.len() > 2 {
        if !study {
            return Err(BraidmapError::InvalidNoteTag {
                reason: "study record on a non-studyable note".to_string(),
            });
        }
        Some(StudyCard::decode(&fields[2..])?)
    } else {
        None
    };

    Ok(NoteProperties { path, study, card })
}

/// Encode note properties as a note tag body
///
/// Studyable notes always carry a study record; a fresh card is minted when
/// none is attached yet.
pub fn encode_note_tag(props: &NoteProperties) -> String {
    let mut body = format!("{};{}", props.path.join("\\"), props.study);
    if props.study {
        let record = match &props.card {
            Some(card) => card.encode(),
            None => StudyCard::new(Utc::now()).encode(),
        };
        body.push(';');
        body.push_str(&record);
    }
    body
}

/// Render note properties as a complete note tag
pub fn render_note_tag(props: &NoteProperties) -> String {
    format!("{}{}{}", NOTE_TAG_OPEN, encode_note_tag(props), TAG_CLOSE)
}

/// Split visible content into display text and link tag
///
/// A trailing `*` suppresses linking; a trailing `#id` token binds the note
/// to that id. Both markers are removed from the display text.
pub fn extract_inline_id(content: &str) -> (String, LinkTag) {
    let trimmed = content.trim();

    if let Some(rest) = trimmed.strip_suffix('*') {
        return (rest.trim_end().to_string(), LinkTag::Suppressed);
    }

    if let Some(m) = inline_id_re().find(trimmed) {
        let id = trimmed[m.start()..m.end()]
            .trim_start()
            .trim_start_matches('#')
            .to_string();
        let display = trimmed[..m.start()].trim_end().to_string();
        return (display, LinkTag::Bound(id));
    }

    (trimmed.to_string(), LinkTag::Unset)
}

/// Remove note and warning tags from a line's content
pub fn strip_tags(content: &str) -> String {
    let without_note = note_re().replace_all(content, "");
    warn_re().replace_all(&without_note, "").into_owned()
}

/// Render a warning tag for the given kind
pub fn render_warn_tag(kind: WarningKind) -> String {
    format!("{}{}{}", WARN_TAG_OPEN, kind.code(), TAG_CLOSE)
}

/// Remove all warning tags (and the space preceding each) from a line
pub fn strip_warn_tags(line: &str) -> String {
    warn_re().replace_all(line, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_tag_span_and_body() {
        let line = "- Igneous %%note rocks\\igneous;false%%";
        let (start, end) = note_tag_span(line).unwrap();
        assert_eq!(&line[start..end], "%%note rocks\\igneous;false%%");
        assert_eq!(note_tag_body(line), Some("rocks\\igneous;false"));
    }

    #[test]
    fn test_map_tag_requires_full_line() {
        assert_eq!(
            map_tag_body("%%map false;true;false;true;36500;0.9;0.1,0.2%%"),
            Some("false;true;false;true;36500;0.9;0.1,0.2")
        );
        assert_eq!(map_tag_body("- item %%map a%%"), None);
    }

    #[test]
    fn test_decode_note_tag_paths() {
        let props = decode_note_tag("rocks\\igneous;false").unwrap();
        assert_eq!(props.path, vec!["rocks", "igneous"]);
        assert!(!props.study);
        assert!(props.card.is_none());

        let props = decode_note_tag(";true").unwrap();
        assert!(props.path.is_empty());
        assert!(props.study);

        // field-terminating semicolon is accepted
        let props = decode_note_tag("rocks;false;").unwrap();
        assert!(!props.study);
    }

    #[test]
    fn test_decode_note_tag_rejects_garbage() {
        assert!(decode_note_tag("rocks").is_err());
        assert!(decode_note_tag("rocks;yes").is_err());
        // record on a non-studyable note
        assert!(decode_note_tag("rocks;false;2026-03-01T10:00:00.000Z;0;0;0;0;0;0;0;").is_err());
    }

    #[test]
    fn test_encode_round_trip_preserves_record() {
        let body = "rocks;true;2026-03-01T10:00:00.000Z;3.5;4.2;1;3;7;1;2;2026-02-26T10:00:00.000Z";
        let props = decode_note_tag(body).unwrap();
        assert_eq!(encode_note_tag(&props), body);
    }

    #[test]
    fn test_encode_mints_card_for_studyable() {
        let props = NoteProperties {
            path: vec!["rocks".to_string()],
            study: true,
            card: None,
        };
        let body = encode_note_tag(&props);
        assert!(body.starts_with("rocks;true;"));
        assert_eq!(body.split(';').count(), 2 + crate::scheduler::CARD_FIELDS);
    }

    #[test]
    fn test_extract_inline_id() {
        assert_eq!(
            extract_inline_id("Igneous #rock-1"),
            ("Igneous".to_string(), LinkTag::Bound("rock-1".to_string()))
        );
        assert_eq!(
            extract_inline_id("Igneous *"),
            ("Igneous".to_string(), LinkTag::Suppressed)
        );
        assert_eq!(
            extract_inline_id("Igneous"),
            ("Igneous".to_string(), LinkTag::Unset)
        );
        // A hash mid-content is not an id binding
        assert_eq!(
            extract_inline_id("C# basics"),
            ("C# basics".to_string(), LinkTag::Unset)
        );
    }

    #[test]
    fn test_strip_and_render_warn_tags() {
        let line = "- Igneous %%warn 4%%";
        assert_eq!(strip_warn_tags(line), "- Igneous");
        assert_eq!(render_warn_tag(WarningKind::LinkConflict), "%%warn 4%%");
        // idempotent on clean lines
        assert_eq!(strip_warn_tags("- Igneous"), "- Igneous");
    }
}

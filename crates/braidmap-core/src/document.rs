//! Document model and parser
//!
//! A mind-map document is a markdown file with a level-1 title heading, a map
//! settings tag and a tab-indented outline of list items. Parsing classifies
//! every line, decodes persisted tags and collects structural warnings
//! without modifying the text.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{BraidmapError, Result};
use crate::line::{classify_line, ParsedLine};
use crate::scheduler::StudyCard;
use crate::settings::{decode_map_tag, MapSettings};
use crate::slug::{embed_file_name, note_slug};
use crate::tag;
use crate::warning::{Warning, WarningKind};

/// Role a note plays in the outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    /// A concept node
    KeyWord,
    /// A connective node whose content ends with a colon
    Relation,
    /// An embedded attachment reference
    Image,
}

/// Explicit link marker carried in the visible content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTag {
    Unset,
    Bound(String),
    Suppressed,
}

/// Persisted per-note state decoded from the note tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteProperties {
    pub path: Vec<String>,
    pub study: bool,
    pub card: Option<StudyCard>,
}

/// A single outline entry
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Zero-based document line
    pub line: usize,
    /// Depth in tabs
    pub indent: usize,
    /// Ordinal position for numbered items, zero for bullets
    pub list_index: u32,
    /// Visible content with tags and link markers removed
    pub content: String,
    pub kind: NoteKind,
    pub link: LinkTag,
    pub props: NoteProperties,
    /// Byte span of the existing note tag within the line
    pub tag_span: Option<(usize, usize)>,
    /// Byte offset just past the visible content, where markers are inserted
    pub content_end: usize,
}

impl Note {
    /// Text that contributes this note's segment to hierarchy paths
    ///
    /// Bound notes use their link id so every member of a group shares the
    /// same identity regardless of local wording.
    pub fn segment_text(&self) -> &str {
        match &self.link {
            LinkTag::Bound(id) => id,
            _ => &self.content,
        }
    }

    /// Whether this note should carry a study record
    ///
    /// Relations are connective tissue and are only studyable when they
    /// contain a cloze deletion.
    pub fn wants_study(&self) -> bool {
        self.kind != NoteKind::Relation || contains_cloze(&self.content)
    }
}

static CLOZE_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn cloze_re() -> &'static Regex {
    CLOZE_RE.get_or_init(|| Regex::new(r"\{.+?\}").expect("static regex"))
}

fn contains_cloze(content: &str) -> bool {
    cloze_re().is_match(content)
}

fn derive_kind(content: &str) -> NoteKind {
    if embed_file_name(content).is_some() {
        NoteKind::Image
    } else if content.ends_with(':') {
        NoteKind::Relation
    } else {
        NoteKind::KeyWord
    }
}

/// A parsed mind-map document
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    /// Slug of the title, used as the center node id
    pub id: String,
    pub settings: MapSettings,
    pub notes: Vec<Note>,
}

/// Parse result: the document plus per-line warnings
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: Document,
    pub warnings: Vec<Warning>,
}

/// Parse document text into its outline model
///
/// Fails when the document has no title heading or no map settings tag.
/// Malformed outline lines never fail the parse; they surface as warnings
/// and their notes are dropped from the model.
pub fn parse_document(text: &str) -> Result<ParseOutcome> {
    let mut title: Option<String> = None;
    let mut settings: Option<MapSettings> = None;
    let mut notes = Vec::new();
    let mut warnings = Vec::new();
    let mut loose_lines: Vec<(usize, WarningKind)> = Vec::new();

    for (line_no, raw) in text.split('\n').enumerate() {
        match classify_line(raw) {
            ParsedLine::Heading { level, text } => {
                if level == 1 && title.is_none() {
                    title = Some(text);
                }
            }
            ParsedLine::MapSettings { body } => {
                if settings.is_none() {
                    settings = Some(decode_map_tag(&body)?);
                }
            }
            ParsedLine::ListItem { indent, list_index, content } => {
                match build_note(line_no, raw, indent, list_index, &content) {
                    Ok(Some(note)) => notes.push(note),
                    Ok(None) => warnings.push(Warning::new(line_no, WarningKind::Invalid)),
                    Err(_) => warnings.push(Warning::new(line_no, WarningKind::Invalid)),
                }
            }
            ParsedLine::Blank => loose_lines.push((line_no, WarningKind::EmptyLine)),
            ParsedLine::Other => loose_lines.push((line_no, WarningKind::Invalid)),
        }
    }

    let title = title.ok_or_else(|| BraidmapError::NotAMindMap {
        reason: "no level-1 title heading".to_string(),
    })?;
    let settings = settings.ok_or_else(|| BraidmapError::NotAMindMap {
        reason: "no map settings tag".to_string(),
    })?;

    // Blank and prose lines only matter inside the outline region
    if let (Some(first), Some(last)) = (notes.first(), notes.last()) {
        let (first, last) = (first.line, last.line);
        for (line_no, kind) in loose_lines {
            if line_no > first && line_no < last {
                warnings.push(Warning::new(line_no, kind));
            }
        }
    }

    let id = note_slug(&title);
    Ok(ParseOutcome {
        document: Document { title, id, settings, notes },
        warnings,
    })
}

/// Build a note from a classified list item, `Ok(None)` when the visible
/// content is empty
fn build_note(
    line_no: usize,
    raw: &str,
    indent: usize,
    list_index: u32,
    content: &str,
) -> Result<Option<Note>> {
    let tag_span = tag::note_tag_span(raw);
    let props = match tag::note_tag_body(raw) {
        Some(body) => tag::decode_note_tag(body)?,
        None => NoteProperties::default(),
    };

    let content_end = match tag_span {
        Some((start, _)) => raw[..start].trim_end().len(),
        None => raw.trim_end().len(),
    };

    let stripped = tag::strip_tags(content);
    let (display, link) = tag::extract_inline_id(&stripped);

    if display.is_empty() && !matches!(link, LinkTag::Bound(_)) {
        return Ok(None);
    }

    let kind = derive_kind(&display);
    Ok(Some(Note {
        line: line_no,
        indent,
        list_index,
        content: display,
        kind,
        link,
        props,
        tag_span,
        content_end,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Geology\n%%map false;true;false;true;36500;0.9;0.1,0.2%%\n\n- Rocks:\n\t- Igneous\n\t- Sedimentary\n- Minerals\n";

    #[test]
    fn test_parse_sample() {
        let outcome = parse_document(SAMPLE).unwrap();
        let doc = outcome.document;
        assert_eq!(doc.title, "Geology");
        assert_eq!(doc.id, "geology");
        assert_eq!(doc.notes.len(), 4);
        assert_eq!(doc.notes[0].kind, NoteKind::Relation);
        assert_eq!(doc.notes[0].content, "Rocks:");
        assert_eq!(doc.notes[1].indent, 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_missing_settings_is_not_a_map() {
        let err = parse_document("# Title\n- Item\n").unwrap_err();
        assert!(matches!(err, BraidmapError::NotAMindMap { .. }));
    }

    #[test]
    fn test_missing_title_is_not_a_map() {
        let err =
            parse_document("%%map false;true;false;true;36500;0.9;0.1%%\n- Item\n").unwrap_err();
        assert!(matches!(err, BraidmapError::NotAMindMap { .. }));
    }

    #[test]
    fn test_blank_line_inside_outline_is_flagged() {
        let text = "# T\n%%map false;true;false;true;36500;0.9;0.1%%\n- A\n\n- B\n";
        let outcome = parse_document(text).unwrap();
        assert_eq!(outcome.warnings, vec![Warning::new(3, WarningKind::EmptyLine)]);
    }

    #[test]
    fn test_malformed_note_tag_is_flagged_not_fatal() {
        let text = "# T\n%%map false;true;false;true;36500;0.9;0.1%%\n- A %%note garbage%%\n- B\n";
        let outcome = parse_document(text).unwrap();
        assert_eq!(outcome.document.notes.len(), 1);
        assert_eq!(outcome.warnings, vec![Warning::new(2, WarningKind::Invalid)]);
    }

    #[test]
    fn test_empty_content_is_flagged() {
        let text = "# T\n%%map false;true;false;true;36500;0.9;0.1%%\n- \n- B\n";
        let outcome = parse_document(text).unwrap();
        assert_eq!(outcome.warnings, vec![Warning::new(2, WarningKind::Invalid)]);
    }

    #[test]
    fn test_existing_tags_are_decoded() {
        let text = "# T\n%%map false;true;false;true;36500;0.9;0.1%%\n- Igneous %%note igneous;false%%\n";
        let outcome = parse_document(text).unwrap();
        let note = &outcome.document.notes[0];
        assert_eq!(note.content, "Igneous");
        assert_eq!(note.props.path, vec!["igneous"]);
        assert!(note.tag_span.is_some());
        assert_eq!(note.content_end, "- Igneous".len());
    }

    #[test]
    fn test_relation_with_cloze_wants_study() {
        let outcome = parse_document(
            "# T\n%%map false;true;false;true;36500;0.9;0.1%%\n- gives {birth} to:\n- Plain:\n",
        )
        .unwrap();
        assert!(outcome.document.notes[0].wants_study());
        assert!(!outcome.document.notes[1].wants_study());
    }
}

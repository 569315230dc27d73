//! Synchronization engine
//!
//! Validation and rewrite planning for a document. A flagged document is
//! never edited; a clean one gets a minimal edit list that brings every note
//! tag and promoted link id up to date. Edits are positional and are applied
//! bottom-to-top, right-to-left, so earlier spans stay valid.

use chrono::Utc;
use serde::Serialize;

use crate::document::{parse_document, Document, LinkTag, Note, NoteProperties};
use crate::error::Result;
use crate::group::build_groups;
use crate::path::assign_paths;
use crate::scheduler::StudyCard;
use crate::tag::render_note_tag;
use crate::warning::{Warning, WarningKind};

/// A single positional text edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    /// Zero-based document line
    pub line: usize,
    /// Byte range within the line to replace
    pub start: usize,
    pub end: usize,
    pub insert: String,
}

/// Planned rewrite for a clean document
#[derive(Debug, Clone, Serialize)]
pub struct RewriteSet {
    pub edits: Vec<Edit>,
    /// Number of notes covered by the plan
    pub notes: usize,
}

/// Result of synchronizing a document
#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Clean(RewriteSet),
    Flagged(Vec<Warning>),
}

/// Parse and fully validate a document without planning any edits
pub fn validate(text: &str) -> Result<(Document, Vec<Warning>)> {
    let outcome = parse_document(text)?;
    let mut warnings = outcome.warnings;
    let doc = outcome.document;

    warnings.extend(structure_warnings(&doc.notes));
    warnings.extend(build_groups(&doc.notes, doc.settings.crosslink).warnings);

    warnings.sort_by_key(|w| (w.line, w.kind.code()));
    warnings.dedup();
    Ok((doc, warnings))
}

/// Validate a document and plan its rewrite
#[tracing::instrument(skip(text))]
pub fn synchronize(text: &str) -> Result<SyncOutcome> {
    let (doc, warnings) = validate(text)?;
    if !warnings.is_empty() {
        tracing::debug!(count = warnings.len(), "document flagged");
        return Ok(SyncOutcome::Flagged(warnings));
    }

    let groups = build_groups(&doc.notes, doc.settings.crosslink);

    // Promotions change note identities, so paths are assigned over the
    // post-promotion link state. This makes a second run a no-op.
    let mut effective = doc.notes.clone();
    for (index, id) in &groups.promoted {
        effective[*index].link = LinkTag::Bound(id.clone());
    }
    let paths = assign_paths(&effective);

    let lines: Vec<&str> = text.split('\n').collect();
    let mut edits = Vec::new();

    for (i, note) in doc.notes.iter().enumerate() {
        let props = NoteProperties {
            path: paths[i].clone(),
            study: note.wants_study(),
            card: next_card(note),
        };
        let tag = render_note_tag(&props);
        let id_marker = groups
            .promoted
            .get(&i)
            .map(|id| format!(" #{}", id));

        match note.tag_span {
            Some((start, end)) => {
                if lines[note.line][start..end] != tag {
                    edits.push(Edit { line: note.line, start, end, insert: tag });
                }
                if let Some(marker) = id_marker {
                    edits.push(Edit {
                        line: note.line,
                        start: note.content_end,
                        end: note.content_end,
                        insert: marker,
                    });
                }
            }
            None => {
                let insert = format!("{} {}", id_marker.unwrap_or_default(), tag);
                edits.push(Edit {
                    line: note.line,
                    start: note.content_end,
                    end: note.content_end,
                    insert,
                });
            }
        }
    }

    tracing::debug!(notes = doc.notes.len(), edits = edits.len(), "rewrite planned");
    Ok(SyncOutcome::Clean(RewriteSet { edits, notes: doc.notes.len() }))
}

/// Carry or mint the study card for a note's next state
///
/// An existing card survives as long as the note stays studyable, so review
/// history is never lost to a content edit.
fn next_card(note: &Note) -> Option<StudyCard> {
    if !note.wants_study() {
        return None;
    }
    if note.props.study {
        if let Some(card) = &note.props.card {
            return Some(card.clone());
        }
    }
    Some(StudyCard::new(Utc::now()))
}

/// Indentation checks over the outline
///
/// The first note must sit at the left margin and no note may indent more
/// than one level past its predecessor.
fn structure_warnings(notes: &[Note]) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut prev_indent: Option<usize> = None;

    for note in notes {
        match prev_indent {
            None => {
                if note.indent != 0 {
                    warnings.push(Warning::new(note.line, WarningKind::Invalid));
                    continue;
                }
            }
            Some(prev) => {
                if note.indent > prev + 1 {
                    warnings.push(Warning::new(note.line, WarningKind::Invalid));
                    continue;
                }
            }
        }
        prev_indent = Some(note.indent);
    }

    warnings
}

/// Apply a planned edit list to document text
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    let mut ordered: Vec<&Edit> = edits.iter().collect();
    ordered.sort_by(|a, b| (b.line, b.start).cmp(&(a.line, a.start)));

    for edit in ordered {
        if let Some(line) = lines.get_mut(edit.line) {
            line.replace_range(edit.start..edit.end, &edit.insert);
        }
    }

    lines.join("\n")
}

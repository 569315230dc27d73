//! Line classification
//!
//! Every line of a document falls into exactly one class. Outline entries are
//! tab-indented list items with either a `-` bullet or an `N.` ordinal
//! marker; headings follow ATX markdown; a map settings tag occupies a line
//! of its own.

use std::sync::OnceLock;

use regex::Regex;

use crate::tag;

/// Classification of a single document line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Heading { level: usize, text: String },
    MapSettings { body: String },
    ListItem { indent: usize, list_index: u32, content: String },
    Blank,
    Other,
}

static LIST_RE: OnceLock<Regex> = OnceLock::new();
static HEADING_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn list_re() -> &'static Regex {
    LIST_RE.get_or_init(|| {
        Regex::new(r"^(?P<tabs>\t*)(?P<marker>[0-9]+\.|-)(?P<content>.*)$").expect("static regex")
    })
}

#[allow(clippy::expect_used)]
fn heading_re() -> &'static Regex {
    HEADING_RE.get_or_init(|| Regex::new(r"^(#{1,6}) (.*)$").expect("static regex"))
}

/// Position of an ordinal marker within its sibling run, zero for bullets
fn list_index(marker: &str) -> u32 {
    marker.strip_suffix('.').and_then(|n| n.parse().ok()).unwrap_or(0)
}

/// Classify a single line of document text
pub fn classify_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Blank;
    }

    if let Some(caps) = heading_re().captures(line) {
        return ParsedLine::Heading {
            level: caps[1].len(),
            text: caps[2].to_string(),
        };
    }

    if let Some(body) = tag::map_tag_body(line.trim()) {
        return ParsedLine::MapSettings {
            body: body.to_string(),
        };
    }

    if let Some(caps) = list_re().captures(line) {
        return ParsedLine::ListItem {
            indent: caps["tabs"].len(),
            list_index: list_index(&caps["marker"]),
            content: caps["content"].to_string(),
        };
    }

    ParsedLine::Other
}

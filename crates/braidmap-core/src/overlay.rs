//! Warning overlay
//!
//! Warnings are surfaced by appending `%%warn N%%` tags to the flagged lines
//! themselves. Annotation always starts from a dismissed document, so stale
//! overlays never accumulate and annotating twice yields the same text.

use std::collections::HashSet;

use crate::tag::{render_warn_tag, strip_warn_tags};
use crate::warning::Warning;

/// Remove every warning tag from the document
pub fn dismiss_warnings(text: &str) -> String {
    text.split('\n')
        .map(strip_warn_tags)
        .collect::<Vec<String>>()
        .join("\n")
}

/// Write the given warnings into the document as warning tags
pub fn annotate_warnings(text: &str, warnings: &[Warning]) -> String {
    let mut lines: Vec<String> = dismiss_warnings(text)
        .split('\n')
        .map(str::to_string)
        .collect();

    let mut seen = HashSet::new();
    for warning in warnings {
        if !seen.insert((warning.line, warning.kind)) {
            continue;
        }
        if let Some(line) = lines.get_mut(warning.line) {
            line.push(' ');
            line.push_str(&render_warn_tag(warning.kind));
        }
    }

    lines.join("\n")
}

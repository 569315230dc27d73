//! Slug generation for note identities
//!
//! A slug is a short, deterministic fingerprint of a note's visible text. It
//! keeps only alphanumeric characters, lowercases them and, when the result is
//! longer than [`SLUG_MAX_LEN`], samples characters at an even stride so that
//! the head, middle and tail of the text all contribute.

use std::sync::OnceLock;

use regex::Regex;

/// Maximum slug length in characters
pub const SLUG_MAX_LEN: usize = 12;

static EMBED_RE: OnceLock<Regex> = OnceLock::new();

fn embed_re() -> &'static Regex {
    #[allow(clippy::expect_used)]
    EMBED_RE.get_or_init(|| Regex::new(r"^!\[\[([^\[\]]+)\]\]$").expect("static regex"))
}

/// Extract the embedded file name when the text is a single embed reference
/// like `![[diagram.png]]`
pub fn embed_file_name(text: &str) -> Option<&str> {
    embed_re()
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Derive the slug for a note's visible text
///
/// Embedded file references keep their file name verbatim so that renaming
/// the note text never detaches the attachment. All other text is reduced to
/// lowercase alphanumerics and capped at [`SLUG_MAX_LEN`] characters by even
/// sampling.
pub fn note_slug(text: &str) -> String {
    if let Some(name) = embed_file_name(text) {
        return name.to_string();
    }

    let compact: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();

    if compact.len() <= SLUG_MAX_LEN {
        return compact.into_iter().collect();
    }

    let interval = (compact.len() as f64 + 0.5) / SLUG_MAX_LEN as f64;
    (0..SLUG_MAX_LEN)
        .map(|i| compact[(i as f64 * interval) as usize])
        .collect()
}

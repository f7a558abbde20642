//! Numbered-item extraction.
//!
//! The model is instructed to emit `1. ...` / `2) ...` style lists. Item
//! bodies may wrap across lines, so each body runs from its marker to the
//! next marker (or end of text) and is then reduced to its first sentence.

use regex::Regex;
use std::sync::LazyLock;

use super::sentences::first_sentence;

/// `1. ` / `12) ` markers at line starts.
static ITEM_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d{1,2}[.)]\s+").unwrap());

/// A leading marker on a single line, for the fallback path.
static LINE_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}[.)]\s+").unwrap());

/// Collapse whitespace runs and trim separator punctuation.
pub fn tidy_sentence(sentence: &str) -> String {
    let collapsed = sentence.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(&[' ', '-', ';', ':', ','][..])
        .to_string()
}

/// Extract candidate sentences from a numbered list.
///
/// Returns one first-sentence candidate per numbered block, in order.
/// Empty candidates are discarded. Returns an empty vec when the text has
/// no numbered markers at all.
pub fn extract_numbered_items(text: &str) -> Vec<String> {
    let markers: Vec<_> = ITEM_MARKER_RE.find_iter(text).collect();
    let mut items = Vec::with_capacity(markers.len());

    for (index, marker) in markers.iter().enumerate() {
        let body_end = markers
            .get(index + 1)
            .map(|next| next.start())
            .unwrap_or(text.len());
        let body = text[marker.end()..body_end].trim();
        let sentence = tidy_sentence(&first_sentence(body));
        if !sentence.is_empty() {
            items.push(sentence);
        }
    }

    items
}

/// Fallback extraction: one candidate per non-blank line.
///
/// Used when the model ignored the numbering instruction. Any leading
/// marker is stripped before the first-sentence rule applies.
pub fn fallback_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let unnumbered = LINE_MARKER_RE.replace(line, "");
        let sentence = tidy_sentence(&first_sentence(&unnumbered));
        if !sentence.is_empty() {
            items.push(sentence);
        }
    }

    items
}

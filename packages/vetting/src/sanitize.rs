//! Sanitization of model-produced limitation lists.
//!
//! Takes unconstrained answer text and reduces it to the output contract:
//! a numbered list of deduplicated, topic-gated single sentences plus the
//! structured validation block parsed out of the tail. Every failure mode
//! degrades to the sentinel text; nothing in here returns an error.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::constants::{is_allowed_control, SENTINEL_TEXT};
use crate::gating::enforce_topic_gate;
use crate::record::{ValidationBlock, ValidationRow};
use crate::text::{extract_numbered_items, fallback_items};

/// A `{"validation": [...]}` block anchored at the end of the text.
static VALIDATION_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(\{\s*"validation"\s*:\s*\[.*?\]\s*\})\s*\z"#).unwrap()
});

/// Any `{..."validation": [...]}`-shaped substring; the LAST match wins.
static VALIDATION_ANY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)(\{.*"validation"\s*:\s*\[.*?\]\s*\})"#).unwrap());

/// Decorative bullet and dash glyphs stripped before item extraction.
static GLYPH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*\-•‣◦–—]").unwrap());

/// Bracketed citation markers: `[1]`, `[Doe, 2020]`, etc.
static CITATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]+\]").unwrap());

/// Sanitizer output: numbered text plus the extracted validation block.
#[derive(Debug, Clone, PartialEq)]
pub struct Sanitized {
    /// Final numbered text, or the sentinel.
    pub text: String,

    /// Validation rows parsed from the raw answer.
    pub validation: ValidationBlock,
}

/// Knobs for the sanitize pass.
#[derive(Debug, Clone)]
pub struct SanitizeConfig {
    /// Minimum item count the record must reach downstream. Carried for the
    /// record validator; the sanitizer itself never enforces it.
    pub min_items: usize,

    /// Maximum items kept after deduplication.
    pub max_items: usize,
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            min_items: crate::constants::DEFAULT_MIN_ITEMS,
            max_items: crate::constants::DEFAULT_MAX_ITEMS,
        }
    }
}

/// Check whether the text matches the sentinel response.
///
/// Whitespace-collapsed, case-insensitive comparison.
pub fn is_sentinel(text: &str) -> bool {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    normalized.eq_ignore_ascii_case(SENTINEL_TEXT)
}

/// Keep only object-shaped rows with an allowed control tag.
fn filter_controls(parsed: &Value) -> ValidationBlock {
    let mut filtered = Vec::new();

    let rows = match parsed.get("validation").and_then(Value::as_array) {
        Some(rows) => rows,
        None => return ValidationBlock::empty(),
    };

    for row in rows {
        if !row.is_object() {
            continue;
        }
        let control = row
            .get("control")
            .and_then(Value::as_str)
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_default();
        if control.is_empty() || !is_allowed_control(&control) {
            continue;
        }
        if let Ok(typed) = serde_json::from_value::<ValidationRow>(row.clone()) {
            filtered.push(typed);
        }
    }

    ValidationBlock { validation: filtered }
}

/// Remove and parse any trailing validation JSON block.
///
/// Returns the text without the block, and the parsed rows. A block that
/// fails to parse still removes itself from the text (empty rows); when no
/// block is found at all the text comes back untouched.
pub fn extract_validation_from_raw(raw: &str) -> (String, ValidationBlock) {
    let matched = VALIDATION_TAIL_RE
        .captures(raw)
        .or_else(|| VALIDATION_ANY_RE.captures_iter(raw).last());

    let group = match matched.as_ref().and_then(|captures| captures.get(1)) {
        Some(group) => group,
        None => return (raw.to_string(), ValidationBlock::empty()),
    };

    let lead = raw[..group.start()].trim().to_string();
    match serde_json::from_str::<Value>(group.as_str()) {
        Ok(parsed) => (lead, filter_controls(&parsed)),
        Err(_) => (lead, ValidationBlock::empty()),
    }
}

/// Return numbered text without a trailing validation JSON block.
pub fn strip_validation_block(text: &str) -> String {
    match VALIDATION_TAIL_RE.captures(text).and_then(|captures| captures.get(1)) {
        Some(group) => text[..group.start()].trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Case-insensitive, order-preserving dedup followed by capping and
/// renumbering.
fn dedup_and_number(sentences: &[String], max_items: usize) -> Option<String> {
    let mut seen = std::collections::HashSet::new();
    let mut deduped = Vec::new();
    for sentence in sentences {
        if seen.insert(sentence.to_lowercase()) {
            deduped.push(sentence.clone());
        }
    }

    if deduped.is_empty() {
        return None;
    }

    let numbered: Vec<String> = deduped
        .iter()
        .take(max_items)
        .enumerate()
        .map(|(index, sentence)| format!("{}. {}", index + 1, sentence))
        .collect();
    Some(numbered.join("\n"))
}

/// Enforce numbering, single-sentence items, gating, deduplication, and
/// validation structure.
///
/// Every empty intermediate result short-circuits to the sentinel text with
/// whatever validation rows were parsed from the tail.
pub fn sanitize_limitations_output(
    raw: &str,
    description: &str,
    config: &SanitizeConfig,
) -> Sanitized {
    let (text_part, validation) = extract_validation_from_raw(raw);

    let sentinel = |validation: ValidationBlock| Sanitized {
        text: SENTINEL_TEXT.to_string(),
        validation,
    };

    if text_part.is_empty() {
        return sentinel(validation);
    }

    let cleaned = text_part.replace("\r\n", "\n").replace('\r', "\n");
    let cleaned = GLYPH_RE.replace_all(&cleaned, "");
    let cleaned = CITATION_RE.replace_all(&cleaned, "");
    let cleaned = cleaned.trim();

    let mut items = extract_numbered_items(cleaned);
    if items.is_empty() {
        items = fallback_items(cleaned);
    }
    if items.is_empty() {
        return sentinel(validation);
    }

    let gated = enforce_topic_gate(&items, description);
    if gated.is_empty() {
        return sentinel(validation);
    }

    match dedup_and_number(&gated, config.max_items) {
        Some(text) => Sanitized { text, validation },
        None => sentinel(validation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_WITH_VALIDATION: &str = r#"1. Route map approvals cannot be sequenced for teaching staff to meet compliance obligations.
2. HR notifications cannot be triggered for non-teaching hires as required by policy.
{"validation":[
  {"item":1,"object":"Route Map","module":"rcm","impact":"Approvals blocked","config_required":"yes","evidence_pointer":"https://help.sap.com/viewer/123","control":"governance"},
  {"item":2,"object":"Notifications","module":"rcm","impact":"HR not alerted","config_required":"no","evidence_pointer":"https://help.sap.com/viewer/456","control":"governance"}
]}"#;

    #[test]
    fn test_preserves_numbering_and_validation() {
        let description = "Workflow approvals for teaching staff with routing gaps.";
        let result =
            sanitize_limitations_output(RAW_WITH_VALIDATION, description, &SanitizeConfig::default());

        assert!(result
            .text
            .starts_with("1. Route map approvals cannot be sequenced for teaching staff"));
        assert!(result.text.contains("2. HR notifications cannot be triggered"));
        assert_eq!(result.validation.validation.len(), 2);
    }

    #[test]
    fn test_returns_sentinel_when_gate_rejects_everything() {
        let raw = "1. The system supports CSV export.";
        let result =
            sanitize_limitations_output(raw, "Generic description without negative cues.", &SanitizeConfig::default());

        assert_eq!(result.text, SENTINEL_TEXT);
        assert!(result.validation.validation.is_empty());
    }

    #[test]
    fn test_sentinel_keeps_extracted_validation() {
        let raw = concat!(
            "1. Everything works fine here.\n",
            r#"{"validation":[{"item":1,"object":"X","module":"rcm","impact":"y","config_required":"no","evidence_pointer":"https://help.sap.com/a","control":"privacy"}]}"#,
        );
        let result = sanitize_limitations_output(raw, "", &SanitizeConfig::default());

        assert_eq!(result.text, SENTINEL_TEXT);
        assert_eq!(result.validation.validation.len(), 1);
    }

    #[test]
    fn test_extract_validation_tail_anchor() {
        let (text, block) = extract_validation_from_raw(RAW_WITH_VALIDATION);
        assert!(text.ends_with("as required by policy."));
        assert_eq!(block.validation.len(), 2);
        assert_eq!(block.validation[0].module, "rcm");
    }

    #[test]
    fn test_extract_validation_mid_text_fallback() {
        // Block not at end of text: the anywhere-fallback finds it, the
        // prose after it is discarded along with the block.
        let raw = concat!(
            "1. Exports cannot be filtered.\n",
            r#"{"validation":[{"item":1,"object":"A","module":"ec","impact":"i","config_required":"no","evidence_pointer":"https://help.sap.com/x","control":"privacy"}]}"#,
            "\ntrailing prose the model added"
        );
        let (text, block) = extract_validation_from_raw(raw);
        assert_eq!(text, "1. Exports cannot be filtered.");
        assert_eq!(block.validation.len(), 1);
        assert_eq!(block.validation[0].object, "A");
    }

    #[test]
    fn test_extract_validation_parse_failure_keeps_lead_text() {
        let raw = "1. Something cannot work.\n{\"validation\": [ {broken ]}";
        let (text, block) = extract_validation_from_raw(raw);
        assert_eq!(text, "1. Something cannot work.");
        assert!(block.validation.is_empty());
    }

    #[test]
    fn test_extract_validation_no_block_returns_text_untouched() {
        let raw = "1. Nothing else here.";
        let (text, block) = extract_validation_from_raw(raw);
        assert_eq!(text, raw);
        assert!(block.validation.is_empty());
    }

    #[test]
    fn test_rows_with_unknown_or_missing_control_are_dropped() {
        let raw = concat!(
            "1. Approvals cannot be routed.\n",
            r#"{"validation":[
                {"item":1,"object":"A","module":"rcm","impact":"i","config_required":"no","evidence_pointer":"https://help.sap.com/x","control":"made-up"},
                {"item":2,"object":"B","module":"rcm","impact":"i","config_required":"no","evidence_pointer":"https://help.sap.com/y"},
                {"item":3,"object":"C","module":"rcm","impact":"i","config_required":"no","evidence_pointer":"https://help.sap.com/z","control":"Governance"}
            ]}"#
        );
        let (_text, block) = extract_validation_from_raw(raw);
        assert_eq!(block.validation.len(), 1);
        assert_eq!(block.validation[0].object, "C");
    }

    #[test]
    fn test_dedup_is_case_insensitive_and_first_wins() {
        let raw = "1. Approvals cannot be routed.\n2. APPROVALS CANNOT BE ROUTED.\n3. Notifications cannot be sent.";
        let result = sanitize_limitations_output(raw, "", &SanitizeConfig::default());
        assert_eq!(
            result.text,
            "1. Approvals cannot be routed.\n2. Notifications cannot be sent."
        );
    }

    #[test]
    fn test_cap_and_renumber() {
        let raw = (1..=15)
            .map(|n| format!("{}. Item {} cannot be used.", n, n))
            .collect::<Vec<_>>()
            .join("\n");
        let config = SanitizeConfig { max_items: 12, ..Default::default() };
        let result = sanitize_limitations_output(&raw, "", &config);
        let lines: Vec<&str> = result.text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[11].starts_with("12. "));
    }

    #[test]
    fn test_sanitize_is_idempotent_on_its_own_output() {
        let description = "Workflow approvals for teaching staff.";
        let config = SanitizeConfig::default();
        let once = sanitize_limitations_output(RAW_WITH_VALIDATION, description, &config);
        let twice = sanitize_limitations_output(&once.text, description, &config);
        assert_eq!(once.text, twice.text);
    }

    #[test]
    fn test_citation_markers_and_bullets_are_stripped() {
        let raw = "1. Exports cannot be scheduled [1].\n2. • Jobs cannot run twice [Doe, 2020].";
        let result = sanitize_limitations_output(raw, "", &SanitizeConfig::default());
        assert!(!result.text.contains('['));
        assert!(!result.text.contains('•'));
    }

    #[test]
    fn test_empty_raw_yields_sentinel() {
        let result = sanitize_limitations_output("", "anything", &SanitizeConfig::default());
        assert_eq!(result.text, SENTINEL_TEXT);
    }

    #[test]
    fn test_strip_validation_block() {
        let stripped = strip_validation_block(RAW_WITH_VALIDATION);
        assert!(stripped.ends_with("as required by policy."));
        assert!(!stripped.contains("\"validation\""));
        assert_eq!(strip_validation_block("  plain text  "), "plain text");
    }

    #[test]
    fn test_is_sentinel_normalization() {
        assert!(is_sentinel(SENTINEL_TEXT));
        assert!(is_sentinel(
            "  1.   no verified limitations found WITHIN the specified scope. "
        ));
        assert!(!is_sentinel("1. No limitations."));
    }
}

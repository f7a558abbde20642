//! Record-level validation.
//!
//! The post-sanitization gate: cross-checks the numbered text against the
//! validation rows, prunes rows that fail evidence/control/module checks,
//! and computes the pass/fail verdict. Structural violations become codes
//! in `failure_reason`; the record is always returned, never rejected.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::is_allowed_control;
use crate::record::{Metrics, Record, ValidationBlock, ValidationRow};
use crate::sanitize::is_sentinel;

use super::evidence::{is_authoritative, normalize_module};

/// Leading `N.` / `N)` line markers in sanitized text.
static NUMBERED_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

fn count_numbered_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| NUMBERED_LINE_RE.is_match(line))
        .count()
}

/// Whether a row survives pruning, and its canonical module when it does.
fn prune_row(row: &ValidationRow) -> Option<ValidationRow> {
    let object = row.object.trim();
    let impact = row.impact.trim();
    let control = row.control.trim().to_lowercase();
    let evidence = row.evidence_pointer.trim();
    let module = normalize_module(&row.module)?;

    let evidence_ok = !evidence.is_empty()
        && (is_authoritative(evidence) || evidence.to_lowercase().starts_with("sap kba"));

    if object.is_empty() || impact.is_empty() || !is_allowed_control(&control) || !evidence_ok {
        return None;
    }

    let mut cleaned = row.clone();
    cleaned.module = module.to_string();
    Some(cleaned)
}

/// Enforce minimum item count, authoritative evidence, and row sanity.
///
/// Pure: returns an enriched copy of the record. Violations accumulate
/// independently (no short-circuit) and are comma-joined into
/// `failure_reason`; on success the key is removed entirely.
pub fn validate_record(record: &Record, min_items: usize) -> Record {
    let mut output = record.clone();
    let raw_text = output.research_analysis.clone().unwrap_or_default();
    let rows = output
        .validation
        .as_ref()
        .map(|block| block.validation.clone())
        .unwrap_or_default();

    let items = count_numbered_lines(raw_text.trim());
    let sentinel = is_sentinel(&raw_text);
    let mut violations: Vec<String> = Vec::new();

    if sentinel && !rows.is_empty() {
        violations.push("sentinel_with_validation".to_string());
    }
    if !sentinel && items < min_items {
        violations.push(format!("min_items<{min_items}"));
    }

    let pruned: Vec<ValidationRow> = rows.iter().filter_map(prune_row).collect();

    if !sentinel && pruned.is_empty() {
        violations.push("missing_validation".to_string());
    }
    if !sentinel && !pruned.is_empty() && pruned.len() > items {
        violations.push("validation_count>items".to_string());
    }

    let processed = if sentinel {
        violations.is_empty()
    } else {
        items >= min_items && pruned.len() == items && violations.is_empty()
    };

    output.metrics = Some(Metrics {
        items,
        validation_rows: pruned.len(),
        min_items,
    });
    output.validation = Some(ValidationBlock { validation: pruned });
    output.processed = Some(processed);
    output.failure_reason = if violations.is_empty() {
        None
    } else {
        Some(violations.join(","))
    };

    output
}

//! Topic and compliance gating logic.

use std::collections::HashSet;

use super::compliance::{is_compliance_tied, NEGATIVE_VERBS};
use super::topics::{classify_topics, Topic};

/// Terms tied to workflow limitations.
pub const WORKFLOW_TERMS: &[&str] = &[
    "route map",
    "approval",
    "approver",
    "step",
    "stage",
    "notification",
    "operator",
    "rbp",
    "permission",
    "status",
    "field",
    "rule",
    "business rule",
    "template",
    "workflow",
];

/// Terms tied to identifier limitations.
pub const IDENTIFIER_TERMS: &[&str] = &[
    "identifier",
    "id",
    "external id",
    "key",
    "unique",
    "duplication",
    "collision",
    "mapping",
];

/// Terms tied to defaulting limitations.
pub const DEFAULTING_TERMS: &[&str] = &[
    "default",
    "derive",
    "pre-populate",
    "propagate",
    "rule",
    "picklist",
    "position",
    "org unit",
    "job",
    "role description",
];

/// Terms tied to mandatory-field limitations.
pub const MANDATORY_TERMS: &[&str] = &[
    "mandatory",
    "required",
    "validation",
    "error",
    "warning",
    "submit",
    "incomplete",
    "field",
];

fn contains_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| lowered.contains(term))
}

/// Check whether a sentence matches the relevant topic signals.
///
/// A negative-limitation verb is always required, except that
/// compliance-tied sentences pass unconditionally when the legislative
/// topic was detected. With no topics detected, the negative verb alone
/// decides.
pub fn topic_gate(sentence: &str, topics: &HashSet<Topic>) -> bool {
    let lowered = sentence.to_lowercase();
    let verbs_hit = contains_any(&lowered, NEGATIVE_VERBS);

    if topics.contains(&Topic::Legislative) && is_compliance_tied(sentence) {
        return true;
    }

    if topics.is_empty() {
        return verbs_hit;
    }

    let topic_hits = (topics.contains(&Topic::Workflow) && contains_any(&lowered, WORKFLOW_TERMS))
        || (topics.contains(&Topic::Identifier) && contains_any(&lowered, IDENTIFIER_TERMS))
        || (topics.contains(&Topic::Defaulting) && contains_any(&lowered, DEFAULTING_TERMS))
        || (topics.contains(&Topic::MandatoryFields) && contains_any(&lowered, MANDATORY_TERMS));

    verbs_hit && topic_hits
}

/// Filter items to those tied to compliance.
pub fn enforce_compliance_gate(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|item| is_compliance_tied(item))
        .cloned()
        .collect()
}

/// Filter limitation items using topic signals derived from the
/// description.
///
/// When the legislative topic was detected, the already-gated items go
/// through a second, compliance-only pass; an empty result stands (the
/// caller emits the sentinel), it is never an error.
pub fn enforce_topic_gate(items: &[String], description: &str) -> Vec<String> {
    let topics = classify_topics(description);
    let gated: Vec<String> = items
        .iter()
        .filter(|sentence| topic_gate(sentence, &topics))
        .cloned()
        .collect();

    if topics.contains(&Topic::Legislative) {
        return enforce_compliance_gate(&gated);
    }
    gated
}

//! Topic classification from requirement descriptions.

use std::collections::HashSet;

/// Topic tags a requirement description can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Legislation, policy, and compliance obligations.
    Legislative,

    /// Approval routing and workflow mechanics.
    Workflow,

    /// Unique identifiers and key mapping.
    Identifier,

    /// Field defaulting and pre-population.
    Defaulting,

    /// Mandatory fields and submission validation.
    MandatoryFields,
}

/// Keyword phrases per topic. A topic fires when ANY of its phrases appears
/// as a substring of the lower-cased description.
pub const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Legislative,
        &[
            "legislation",
            "legislative",
            "statutory",
            "public service act",
            "award",
            "enterprise agreement",
            "directive",
            "policy",
            "policies",
            "compliance",
        ],
    ),
    (
        Topic::Workflow,
        &[
            "workflow",
            "approval",
            "approvals",
            "route map",
            "routing",
            "endorsement",
            "teaching",
            "non-teaching",
            "hr business partner",
        ],
    ),
    (
        Topic::Identifier,
        &[
            "unique identifier",
            "unique id",
            "requisition id",
            "job id",
            "req id",
            "identifier",
        ],
    ),
    (
        Topic::Defaulting,
        &[
            "default",
            "auto default",
            "pre-populate",
            "prepopulate",
            "organisational unit",
            "org unit",
            "job",
            "position",
            "role description",
        ],
    ),
    (
        Topic::MandatoryFields,
        &[
            "mandatory",
            "required field",
            "validation",
            "error message",
            "warning",
            "incomplete",
            "submission",
            "submit",
        ],
    ),
];

/// Return the set of topics triggered by keywords in the description.
///
/// The empty set is a valid result; callers fall back to the generic
/// negative-verb gate in that case.
pub fn classify_topics(description: &str) -> HashSet<Topic> {
    let lowered = description.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(topic, _)| *topic)
        .collect()
}

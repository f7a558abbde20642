//! Compliance gating helpers.

/// Terms that tie a sentence to compliance obligations.
pub const COMPLIANCE_TERMS: &[&str] = &[
    "compliance",
    "legislation",
    "legislative",
    "statutory",
    "evidence",
    "audit",
    "record",
    "retention",
    "privacy",
    "equal opportunity",
    "merit",
    "disclosure",
    "appeal",
    "governance",
    "policy",
    "directive",
    "act",
    "award",
    "agreement",
    "provenance",
    "access control",
    "consent",
];

/// Negative-limitation signal phrases. A sentence must contain at least one
/// to pass any gate.
pub const NEGATIVE_VERBS: &[&str] = &[
    "cannot",
    "does not",
    "no ",
    "limits",
    "restrict",
    "missing",
    "lack",
    "lacks",
    "prevents",
    "risks",
    "fails",
    "disabled",
    "unsupported",
];

/// Whether the sentence addresses compliance constraints with negative
/// framing.
pub fn is_compliance_tied(sentence: &str) -> bool {
    let lowered = sentence.to_lowercase();
    COMPLIANCE_TERMS.iter().any(|term| lowered.contains(term))
        && NEGATIVE_VERBS.iter().any(|verb| lowered.contains(verb))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_term_with_negative_verb() {
        assert!(is_compliance_tied(
            "Audit trails cannot be exported for statutory review."
        ));
    }

    #[test]
    fn test_compliance_term_without_negative_verb() {
        assert!(!is_compliance_tied("Audit trails are fully supported."));
    }

    #[test]
    fn test_negative_verb_without_compliance_term() {
        assert!(!is_compliance_tied("The picklist cannot be sorted."));
    }
}

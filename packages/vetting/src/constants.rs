//! Fixed vocabularies and default values shared across the harness.

/// The exact text a record carries when no qualifying limitations survive.
pub const SENTINEL_TEXT: &str = "1. No verified limitations found within the specified scope.";

/// Minimum number of limitation items required for a record to pass.
pub const DEFAULT_MIN_ITEMS: usize = 3;

/// Maximum number of limitation items kept after deduplication.
pub const DEFAULT_MAX_ITEMS: usize = 12;

/// Default object-of-analysis clause for the restrictive prompt.
pub const DEFAULT_OBJECT_OF_ANALYSIS: &str = "the requirement under evaluation";

/// Default in-scope module list for the restrictive prompt.
pub const DEFAULT_IN_SCOPE_MODULES: &str = "RCM, EC, ECP, ONB, RBP, RMK, BTP(Workflow/Ext), \
     Integration Suite/IC, OData APIs, Stories/Reporting, Data Sphere, ALM, \
     OpenText xECM/InfoArchive, S/4HANA Finance(if interfaced), \
     Microsoft Fabric HR RG, DataHub, Purview, Azure DevOps, Terraform, Sentinel/Splunk";

/// Default constraint filter clause for the restrictive prompt.
pub const DEFAULT_CONSTRAINT_FILTER: &str =
    "only constraints that directly affect meeting the stated requirement";

/// Control tags a validation row may carry. Rows with any other control
/// value are dropped.
pub const ALLOWED_CONTROLS: &[&str] = &[
    "record-keeping",
    "audit-trail",
    "privacy",
    "data-retention",
    "equal-opportunity",
    "merit-selection",
    "conflict-of-interest",
    "notification-content",
    "access-control",
    "provenance",
    "reporting-disclosure",
    "localization",
    "jurisdiction-mapping",
    "appeals-review",
    "governance",
];

/// Canonical module labels, in declaration order. Normalization tries these
/// longest-first so that "OpenText xECM" wins over shorter prefixes.
pub const ALLOWED_MODULES_ORDERED: &[&str] = &[
    "RCM",
    "EC",
    "ECP",
    "ONB",
    "RBP",
    "RMK",
    "BTP",
    "Integration Suite",
    "IC",
    "OData APIs",
    "Stories/Reporting",
    "Data Sphere",
    "ALM",
    "OpenText xECM",
    "OpenText InfoArchive",
    "S/4HANA Finance",
    "Microsoft Fabric HR RG",
    "DataHub",
    "Purview",
    "Azure DevOps",
    "Terraform",
    "Sentinel",
    "Splunk",
];

/// Host suffixes accepted as authoritative evidence sources.
pub const AUTHORITATIVE_SUFFIXES: &[&str] = &[
    ".help.sap.com",
    ".support.sap.com",
    ".userapps.support.sap.com",
    ".launchpad.support.sap.com",
    ".me.sap.com",
    "help.sap.com",
    "support.sap.com",
    "userapps.support.sap.com",
    "launchpad.support.sap.com",
    "me.sap.com",
];

/// Whether a control tag belongs to the allowed set.
///
/// Expects the value already trimmed and lower-cased.
pub fn is_allowed_control(control: &str) -> bool {
    ALLOWED_CONTROLS.contains(&control)
}

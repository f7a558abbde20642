//! Restrictive limitations prompt.

use crate::constants::{
    DEFAULT_CONSTRAINT_FILTER, DEFAULT_IN_SCOPE_MODULES, DEFAULT_MIN_ITEMS,
    DEFAULT_OBJECT_OF_ANALYSIS,
};
use crate::record::Record;

/// The restrictive research prompt.
///
/// Encodes the output contract the sanitizer and validator rely on: a
/// numbered single-sentence list, the allowed-control vocabulary, the
/// trailing validation JSON block, and the sentinel clause.
pub const RESTRICTIVE_TEMPLATE: &str = r#"
Instruction:
Think step by step INTERNALLY to identify only verified LIMITATIONS of the feature described in Context; DO NOT reveal your steps. Output must strictly follow Deliverable.

Context:
- Title: {title}
- Description: {description}
- Area: {area}
- Product: {product}

Scope:
- Object of analysis: {object_of_analysis}
- In-scope modules: {in_scope_modules}
- Constraint filter: {constraint_filter}
- Exclude: generic UX opinions, performance anecdotes, benefits, mitigations, workarounds, sales claims, and topics not directly constraining the object of analysis.

Rules (hard):
Allowed controls for "control" field in validation JSON:
["record-keeping","audit-trail","privacy","data-retention","equal-opportunity","merit-selection",
 "conflict-of-interest","notification-content","access-control","provenance","reporting-disclosure",
 "localization","jurisdiction-mapping","appeals-review","governance"].

1) Produce ONLY a numbered list starting at 1; one item per line; each item is a SINGLE factual sentence; no headers/preface/summary/citations/markdown.
2) Each item MUST explicitly state the system limitation AND how it constrains the object of analysis within the stated scope.
3) Include ONLY limitations that are documented or widely recognized in authoritative sources (product docs, admin guides, release notes, KBAs). No speculation.
4) Output AT LEAST {min_items} verified items if any exist; otherwise use the sentinel. Each item MUST include an authoritative evidence pointer (SAP Help/Support/KBA/Release Note/Implementation Guide URL or ID).
5) Controls must be one of the allowed list above.
6) After the numbered list, output a VALIDATION JSON object exactly in this format (no extra text):

{"validation":[
  {"item":1,"object":"<component>","module":"<module>","impact":"<short clause>","config_required":"yes|no","evidence_pointer":"<SAP Help/KBA URL or ID>","control":"<see allowed list>"},
  {"item":2,"object":"<component>","module":"<module>","impact":"<short clause>","config_required":"yes|no","evidence_pointer":"<SAP Help/KBA URL or ID>","control":"<see allowed list>"}
]}

7) If no verified, scope-specific limitations exist, output EXACTLY:
1. No verified limitations found within the specified scope.
{"validation":[]}

Deliverable:
1. <single-sentence limitation tied to the scope>
2. <single-sentence limitation tied to the scope>
...
{"validation":[...]}
"#;

/// Inputs for the restrictive prompt.
///
/// Every field documents the fallback used when it is `None`; resolution
/// happens in [`build_restrictive_prompt`], before formatting.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Requirement title. Fallback: "Unknown Title".
    pub title: Option<String>,

    /// Requirement description. Fallback: "No description available".
    pub description: Option<String>,

    /// Business area, list fields pre-joined with `", "`. Fallback: empty.
    pub area: Option<String>,

    /// Product, list fields pre-joined with `", "`. Fallback: empty.
    pub product: Option<String>,

    /// Object-of-analysis clause. Fallback: [`DEFAULT_OBJECT_OF_ANALYSIS`].
    pub object_of_analysis: Option<String>,

    /// In-scope module list. Fallback: [`DEFAULT_IN_SCOPE_MODULES`].
    pub in_scope_modules: Option<String>,

    /// Constraint filter clause. Fallback: [`DEFAULT_CONSTRAINT_FILTER`].
    pub constraint_filter: Option<String>,

    /// Minimum item count demanded from the model. Zero means
    /// [`DEFAULT_MIN_ITEMS`].
    pub min_items: usize,
}

impl PromptContext {
    /// Build a context from record fields, accepting the historical
    /// alternate key spellings.
    pub fn from_record(record: &Record) -> Self {
        let non_empty = |value: String| if value.is_empty() { None } else { Some(value) };

        Self {
            title: record.string_field(&["Title"]),
            description: record.string_field(&["Description"]),
            area: non_empty(record.joined_field("Area")),
            product: non_empty(record.joined_field("Product")),
            object_of_analysis: record.string_field(&["ObjectOfAnalysis", "object_of_analysis"]),
            in_scope_modules: record.string_field(&["InScopeModules", "in_scope_modules"]),
            constraint_filter: record.string_field(&["ConstraintFilter", "constraint_filter"]),
            min_items: 0,
        }
    }

    /// Set the minimum item count.
    pub fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }
}

/// Inject context fields into the restrictive template.
pub fn build_restrictive_prompt(context: &PromptContext) -> String {
    let min_items = if context.min_items == 0 {
        DEFAULT_MIN_ITEMS
    } else {
        context.min_items
    };

    RESTRICTIVE_TEMPLATE
        .replace("{title}", context.title.as_deref().unwrap_or("Unknown Title"))
        .replace(
            "{description}",
            context
                .description
                .as_deref()
                .unwrap_or("No description available"),
        )
        .replace("{area}", context.area.as_deref().unwrap_or(""))
        .replace("{product}", context.product.as_deref().unwrap_or(""))
        .replace(
            "{object_of_analysis}",
            context
                .object_of_analysis
                .as_deref()
                .unwrap_or(DEFAULT_OBJECT_OF_ANALYSIS),
        )
        .replace(
            "{in_scope_modules}",
            context
                .in_scope_modules
                .as_deref()
                .unwrap_or(DEFAULT_IN_SCOPE_MODULES),
        )
        .replace(
            "{constraint_filter}",
            context
                .constraint_filter
                .as_deref()
                .unwrap_or(DEFAULT_CONSTRAINT_FILTER),
        )
        .replace("{min_items}", &min_items.to_string())
}

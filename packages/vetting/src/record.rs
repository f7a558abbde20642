//! Record and validation-row types.
//!
//! A record starts life as an arbitrary JSON object read from an input line.
//! The pipeline enriches it in place: `research_analysis`, `validation`,
//! `processed`, `metrics`, and optionally `failure_reason` and
//! `human_readable`. Every input field passes through untouched via the
//! flattened map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One structured evidence entry accompanying a numbered limitation item.
///
/// All string fields default to empty on deserialization; rows that are
/// malformed on the wire are dropped by pruning, never surfaced as errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationRow {
    /// 1-based index of the limitation item this row belongs to.
    #[serde(default)]
    pub item: i64,

    /// Component or artifact the limitation applies to.
    #[serde(default)]
    pub object: String,

    /// Module label; canonicalized during validation.
    #[serde(default)]
    pub module: String,

    /// Short clause describing the impact.
    #[serde(default)]
    pub impact: String,

    /// "yes" or "no".
    #[serde(default)]
    pub config_required: String,

    /// Authoritative URL or KBA identifier backing the row.
    #[serde(default)]
    pub evidence_pointer: String,

    /// Control tag; must belong to the allowed-control set.
    #[serde(default)]
    pub control: String,
}

/// The structured evidence side-channel of a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationBlock {
    /// Evidence rows, in wire order.
    #[serde(default)]
    pub validation: Vec<ValidationRow>,
}

impl ValidationBlock {
    /// An empty block.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Informational counters set by the record validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Numbered lines found in the sanitized text.
    pub items: usize,

    /// Validation rows surviving pruning.
    pub validation_rows: usize,

    /// Minimum item count the record was validated against.
    pub min_items: usize,
}

/// A pipeline record: arbitrary input fields plus pipeline-added results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    /// Final sanitized numbered text, or the sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_analysis: Option<String>,

    /// Structured evidence rows extracted alongside the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationBlock>,

    /// Advisory plain-language rendering of the numbered list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_readable: Option<String>,

    /// Pass/fail verdict computed by the validator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<bool>,

    /// Informational counters from the validator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    /// Comma-joined violation codes; absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,

    /// All other input fields (Title, Description, Area, Product, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Create a record from bare input fields.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// The record title, or "Unknown" when absent.
    pub fn title(&self) -> &str {
        self.fields
            .get("Title")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
    }

    /// The record description, or empty when absent.
    pub fn description(&self) -> &str {
        self.fields
            .get("Description")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// First non-empty string value among the given field names.
    pub fn string_field(&self, names: &[&str]) -> Option<String> {
        names
            .iter()
            .filter_map(|name| self.fields.get(*name))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// A field that may arrive as a list or a scalar, joined with `", "`.
    pub fn joined_field(&self, name: &str) -> String {
        match self.fields.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

//! Run configuration resolved from the environment.

use std::path::PathBuf;

use crate::constants::DEFAULT_MIN_ITEMS;

/// Default cap on records processed in one run.
const DEFAULT_MAX_RECORDS: usize = 500;

/// Runtime configuration for a batch run.
///
/// Resolved from the environment first; the CLI layers its flag overrides
/// on top of the resolved values.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input JSONL path. Env `VETTING_INPUT`, default
    /// `data/sap_question.jsonl`.
    pub input_path: PathBuf,

    /// Output JSONL path. Env `VETTING_OUTPUT`, default
    /// `data/sap_question_vetted.jsonl`.
    pub output_path: PathBuf,

    /// Maximum records processed this run. Env `VETTING_MAX_RECORDS`,
    /// default 500; unparseable values fall back to the default.
    pub max_records: usize,

    /// Minimum limitation items a record must reach to pass validation.
    pub min_items: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/sap_question.jsonl"),
            output_path: PathBuf::from("data/sap_question_vetted.jsonl"),
            max_records: DEFAULT_MAX_RECORDS,
            min_items: DEFAULT_MIN_ITEMS,
        }
    }
}

impl RunConfig {
    /// Resolve the configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            input_path: var("VETTING_INPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_path),
            output_path: var("VETTING_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            max_records: var("VETTING_MAX_RECORDS")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.max_records),
            min_items: defaults.min_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.max_records, 500);
        assert_eq!(config.min_items, DEFAULT_MIN_ITEMS);
        assert_eq!(config.input_path, PathBuf::from("data/sap_question.jsonl"));
    }
}

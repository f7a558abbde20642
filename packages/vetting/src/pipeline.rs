//! Processing pipeline for research records.
//!
//! Per-record state machine: build prompt → collect streamed answer (one
//! non-streaming fallback on failure) → sanitize → advisory rewrite →
//! validate. Batches run strictly sequentially; every failure mode inside a
//! record degrades to the sentinel result, so one record can never abort
//! the batch.

use tracing::{error, info, warn};

use crate::client::{collect_stream_text, ResearchClient};
use crate::constants::SENTINEL_TEXT;
use crate::prompts::{build_restrictive_prompt, PromptContext};
use crate::record::{Record, ValidationBlock};
use crate::rewrite::{rewrite_human_readable, RewriterConfig};
use crate::sanitize::{sanitize_limitations_output, strip_validation_block, SanitizeConfig};
use crate::validate::validate_record;

/// Progress callbacks for pipeline runs.
///
/// Injected by the caller so the core transforms stay pure; the pipeline
/// reports at its call boundaries only.
pub trait PipelineObserver: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Observer that forwards to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn warn(&self, message: &str) {
        warn!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}

/// Observer that discards everything.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Knobs for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Sanitize/validate thresholds.
    pub sanitize: SanitizeConfig,

    /// Rewrite stage configuration.
    pub rewriter: RewriterConfig,
}

/// Fetch the raw answer: streaming first, one non-streaming fallback.
///
/// Returns `None` when both attempts fail; the caller emits the sentinel.
async fn fetch_raw_answer(
    client: &dyn ResearchClient,
    prompt: &str,
    index: usize,
    observer: &dyn PipelineObserver,
) -> Option<String> {
    match collect_stream_text(client, prompt).await {
        Ok(raw) => Some(raw),
        Err(stream_error) => {
            observer.warn(&format!(
                "Streaming failed for record {index}: {stream_error}; attempting fallback."
            ));
            match client.ask_once(prompt).await {
                Ok(raw) => Some(raw),
                Err(fallback_error) => {
                    observer.error(&format!(
                        "Non-streaming fallback failed for record {index}: {fallback_error}"
                    ));
                    None
                }
            }
        }
    }
}

/// Process a single record through prompt, sanitization, rewrite, and
/// validation.
pub async fn process_single_record(
    record: &Record,
    index: usize,
    total: usize,
    client: &dyn ResearchClient,
    config: &PipelineConfig,
    observer: &dyn PipelineObserver,
) -> Record {
    observer.info(&format!(
        "Processing record {index}/{total}: {}",
        record.title()
    ));

    let prompt = build_restrictive_prompt(
        &PromptContext::from_record(record).with_min_items(config.sanitize.min_items),
    );

    let (final_text, validation) = match fetch_raw_answer(client, &prompt, index, observer).await {
        Some(raw) => {
            let sanitized =
                sanitize_limitations_output(&raw, record.description(), &config.sanitize);
            (sanitized.text, sanitized.validation)
        }
        None => (SENTINEL_TEXT.to_string(), ValidationBlock::empty()),
    };

    let mut enriched = record.clone();
    enriched.research_analysis = Some(final_text.clone());
    enriched.validation = Some(validation);

    // Advisory only: the rewrite never influences validation.
    let numbered_only = strip_validation_block(&final_text);
    enriched.human_readable =
        Some(rewrite_human_readable(&config.rewriter, &numbered_only).await);

    validate_record(&enriched, config.sanitize.min_items)
}

/// Process records sequentially, returning validated outputs.
pub async fn process_records(
    records: &[Record],
    client: &dyn ResearchClient,
    config: &PipelineConfig,
    max_records: Option<usize>,
    observer: &dyn PipelineObserver,
) -> Vec<Record> {
    let limited: &[Record] = match max_records {
        Some(max) if max < records.len() => &records[..max],
        _ => records,
    };
    let total = limited.len();
    observer.info(&format!("Processing {total} record(s)"));

    let mut processed = Vec::with_capacity(total);
    for (offset, record) in limited.iter().enumerate() {
        let index = offset + 1;
        let validated =
            process_single_record(record, index, total, client, config, observer).await;
        processed.push(validated);
        observer.info(&format!("Record {index} completed"));
    }
    processed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockClient;
    use serde_json::json;

    const RAW_RESPONSE: &str = r#"1. Route map approvals cannot be sequenced for teaching staff to meet compliance obligations.
2. HR notifications cannot be triggered for new hires as required by policy.
{"validation":[
  {"item":1,"object":"Route Map","module":"rcm","impact":"Approvals blocked","config_required":"yes","evidence_pointer":"https://help.sap.com/viewer/123","control":"governance"},
  {"item":2,"object":"Notifications","module":"rcm","impact":"HR not alerted","config_required":"no","evidence_pointer":"https://help.sap.com/viewer/456","control":"governance"}
]}"#;

    fn sample_record() -> Record {
        serde_json::from_value(json!({
            "Title": "Sample",
            "Description": "Workflow approvals for teaching staff with routing gaps.",
            "Area": ["HR"],
            "Product": ["Recruiting"],
        }))
        .unwrap()
    }

    fn test_config() -> PipelineConfig {
        PipelineConfig {
            sanitize: SanitizeConfig {
                min_items: 2,
                ..SanitizeConfig::default()
            },
            rewriter: RewriterConfig {
                enabled: false,
                ..RewriterConfig::default()
            },
        }
    }

    #[tokio::test]
    async fn test_smoke_processed_record_passes() {
        let client = MockClient::new(RAW_RESPONSE);
        let record = sample_record();

        let processed =
            process_single_record(&record, 1, 1, &client, &test_config(), &NoopObserver).await;

        assert_eq!(processed.processed, Some(true));
        assert_eq!(processed.validation.as_ref().unwrap().validation.len(), 2);
        assert!(processed.human_readable.as_ref().unwrap().starts_with("- "));
        assert!(processed.failure_reason.is_none());
    }

    #[tokio::test]
    async fn test_stream_failure_uses_fallback_once() {
        let client = MockClient::new(RAW_RESPONSE).with_stream_failure();
        let record = sample_record();

        let processed =
            process_single_record(&record, 1, 1, &client, &test_config(), &NoopObserver).await;

        assert_eq!(processed.processed, Some(true));
        assert_eq!(client.stream_calls(), 1);
        assert_eq!(client.once_calls(), 1);
    }

    #[tokio::test]
    async fn test_both_paths_failing_yields_clean_sentinel() {
        let client = MockClient::new(RAW_RESPONSE)
            .with_stream_failure()
            .with_once_failure();
        let record = sample_record();

        let processed =
            process_single_record(&record, 1, 1, &client, &test_config(), &NoopObserver).await;

        assert_eq!(
            processed.research_analysis.as_deref(),
            Some(SENTINEL_TEXT)
        );
        assert!(processed.validation.as_ref().unwrap().validation.is_empty());
        // A clean sentinel with no rows is a valid outcome.
        assert_eq!(processed.processed, Some(true));
        // No retries beyond the single fallback.
        assert_eq!(client.once_calls(), 1);
    }

    #[tokio::test]
    async fn test_batch_is_sequential_and_capped() {
        let client = MockClient::new(RAW_RESPONSE);
        let records = vec![sample_record(), sample_record(), sample_record()];

        let processed =
            process_records(&records, &client, &test_config(), Some(2), &NoopObserver).await;

        assert_eq!(processed.len(), 2);
        assert_eq!(client.stream_calls(), 2);
    }

    #[tokio::test]
    async fn test_prompt_carries_record_context() {
        let client = MockClient::new(RAW_RESPONSE);
        let record = sample_record();

        process_single_record(&record, 1, 1, &client, &test_config(), &NoopObserver).await;

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Title: Sample"));
        assert!(prompts[0].contains("Area: HR"));
    }
}
